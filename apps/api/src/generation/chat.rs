//! Assistant chat grounded on the current recruitment package.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::package::RecruitmentPackage;
use crate::generation::prompts::{CHAT_CONTEXT_SYSTEM_TEMPLATE, CHAT_THINKING_BUDGET};
use crate::llm_client::prompts::RECRUITER_PERSONA;
use crate::llm_client::{LlmClient, Turn};
use crate::models::chat::{ChatMessage, ChatRole};

/// Opening model turn of a new conversation, as the client shows it.
pub const GREETING: &str = "Hi! I can help you refine your recruitment strategy \
    or answer questions about the generated content.";
/// Shown when the model answers with no text.
pub const FALLBACK_REPLY: &str = "I'm having trouble thinking right now. Please try again.";
/// Shown when the chat call itself fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
    #[serde(default)]
    pub package: Option<RecruitmentPackage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: ChatMessage,
    /// False when the reply is a canned fallback rather than model output.
    pub answered: bool,
}

/// Plain-text summary of a package handed to the assistant as context.
pub fn build_chat_context(package: &RecruitmentPackage) -> String {
    let responsibilities: String = package
        .key_responsibilities
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "JOB TITLE: {}\n\nKEY RESPONSIBILITIES:\n{}\n\nJOB DESCRIPTION:\n{}",
        package.job_title, responsibilities, package.job_description
    )
}

pub fn system_instruction(package: Option<&RecruitmentPackage>) -> String {
    match package {
        Some(p) => CHAT_CONTEXT_SYSTEM_TEMPLATE
            .replace("{persona}", RECRUITER_PERSONA)
            .replace("{context}", &build_chat_context(p)),
        None => RECRUITER_PERSONA.to_string(),
    }
}

/// Prior turns as sent to the model. A conversation with no history still
/// opens with the greeting the user saw.
pub(crate) fn history_turns(history: &[ChatMessage]) -> Vec<Turn<'_>> {
    if history.is_empty() {
        return vec![Turn {
            role: ChatRole::Model.as_str(),
            text: GREETING,
        }];
    }
    history
        .iter()
        .map(|m| Turn {
            role: m.role.as_str(),
            text: &m.text,
        })
        .collect()
}

/// Sends one user message. Collaborator failures become a fallback reply
/// instead of an error so the conversation can continue.
pub async fn send_chat_turn(
    llm: &LlmClient,
    request: &ChatRequest,
) -> Result<ChatResponse, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let history = history_turns(&request.history);
    let system = system_instruction(request.package.as_ref());

    info!(
        "Chat turn (history={}, grounded={})",
        history.len(),
        request.package.is_some()
    );

    let (text, answered) = match llm
        .chat(&history, message, &system, CHAT_THINKING_BUDGET)
        .await
    {
        Ok(Some(text)) => (text, true),
        Ok(None) => (FALLBACK_REPLY.to_string(), false),
        Err(e) => {
            warn!("Chat call failed: {e}");
            (ERROR_REPLY.to_string(), false)
        }
    };

    Ok(ChatResponse {
        reply: ChatMessage::now(ChatRole::Model, text),
        answered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::package::tests::sample_package;

    #[test]
    fn test_context_lists_title_responsibilities_and_description() {
        let package = sample_package();
        let context = build_chat_context(&package);
        assert!(context
            .starts_with("JOB TITLE: Senior, Product Manager!\n\nKEY RESPONSIBILITIES:\n- "));
        assert_eq!(
            context.matches("\n- ").count(),
            package.key_responsibilities.len() + 2,
            "responsibilities plus the two JD bullets"
        );
        assert!(context.ends_with(&package.job_description));
    }

    #[test]
    fn test_system_instruction_without_package_is_persona() {
        assert_eq!(system_instruction(None), RECRUITER_PERSONA);
    }

    #[test]
    fn test_system_instruction_embeds_context() {
        let package = sample_package();
        let system = system_instruction(Some(&package));
        assert!(system.starts_with(RECRUITER_PERSONA));
        assert!(system.contains("CONTEXT FROM GENERATED JOB DESCRIPTION:\nJOB TITLE: "));
        assert!(system.ends_with("answer the user's questions about the role."));
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let llm = LlmClient::new("k".to_string(), "http://127.0.0.1:9".to_string()).unwrap();
        let request = ChatRequest {
            history: vec![ChatMessage::now(ChatRole::Model, GREETING)],
            message: "   ".to_string(),
            package: None,
        };
        assert!(matches!(
            send_chat_turn(&llm, &request).await,
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_history_opens_with_greeting() {
        let turns = history_turns(&[]);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, "model");
        assert!(turns[0].text.starts_with("Hi! I can help you refine"));
        assert!(turns[0].text.ends_with("about the generated content."));

        let history = vec![
            ChatMessage::now(ChatRole::Model, GREETING),
            ChatMessage::now(ChatRole::User, "Shorten the JD"),
        ];
        let turns = history_turns(&history);
        assert_eq!(turns.len(), 2);
        assert_eq!((turns[1].role, turns[1].text), ("user", "Shorten the JD"));
    }

    #[test]
    fn test_request_history_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(request.history.is_empty());
        assert!(request.package.is_none());
    }
}
