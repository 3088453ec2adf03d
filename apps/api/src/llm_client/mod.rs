/// LLM client: the single point of entry for all Gemini API calls in RecruitAI.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Generation, chat and header-image requests all go through this module.
///
/// The client is constructed once in `main` and handed to handlers through
/// `AppState`; there is no process-wide instance.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Models are hardcoded to prevent accidental drift.
pub const GENERATION_MODEL: &str = "gemini-3-pro-preview";
pub const CHAT_MODEL: &str = "gemini-3-pro-preview";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
    /// Thought summaries are returned as text parts flagged `thought`.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

impl InlineData {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated answer text of the first candidate, thought parts excluded.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// First inline image of the first candidate.
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// One prior chat turn. `role` is `"user"` or `"model"`.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    pub role: &'a str,
    pub text: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services in RecruitAI.
/// Wraps the Gemini `generateContent` API with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<LlmResponse, LlmError> {
        let url = self.endpoint(model);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            if let Some(usage) = &llm_response.usage_metadata {
                debug!(
                    "LLM call to {} succeeded: prompt_tokens={}, candidate_tokens={}",
                    model, usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Single-prompt call constrained to JSON output matching `schema`.
    /// Returns the JSON text with any code fences stripped; callers own validation.
    pub async fn call_structured(
        &self,
        prompt: &str,
        schema: &Value,
        thinking_budget: u32,
    ) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(schema),
                thinking_config: Some(ThinkingConfig { thinking_budget }),
                ..Default::default()
            },
        };

        let response = self.call(GENERATION_MODEL, &request).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(strip_json_fences(&text).to_string())
    }

    /// Sends one chat message on top of `history`. `Ok(None)` means the model
    /// answered with no text.
    pub async fn chat(
        &self,
        history: &[Turn<'_>],
        message: &str,
        system: &str,
        thinking_budget: u32,
    ) -> Result<Option<String>, LlmError> {
        let request = build_chat_request(history, message, system, thinking_budget);
        let response = self.call(CHAT_MODEL, &request).await?;
        Ok(response.text())
    }

    /// Requests a single image. `Ok(None)` when the model returned no image part.
    pub async fn generate_image(&self, prompt: &str) -> Result<Option<InlineData>, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["IMAGE"]),
                ..Default::default()
            },
        };
        let response = self.call(IMAGE_MODEL, &request).await?;
        Ok(response.inline_image().cloned())
    }
}

fn build_chat_request<'a>(
    history: &[Turn<'a>],
    message: &'a str,
    system: &'a str,
    thinking_budget: u32,
) -> GenerateContentRequest<'a> {
    let mut contents: Vec<RequestContent<'a>> = history
        .iter()
        .map(|t| RequestContent {
            role: t.role,
            parts: vec![TextPart { text: t.text }],
        })
        .collect();
    contents.push(RequestContent {
        role: "user",
        parts: vec![TextPart { text: message }],
    });

    GenerateContentRequest {
        contents,
        system_instruction: Some(SystemInstruction {
            parts: vec![TextPart { text: system }],
        }),
        generation_config: GenerationConfig {
            thinking_config: Some(ThinkingConfig { thinking_budget }),
            ..Default::default()
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
