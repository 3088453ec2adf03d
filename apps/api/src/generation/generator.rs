//! Package generation: turns raw recruiting notes into a validated recruitment package.
//!
//! Flow: validate input → build prompt → structured LLM call → schema validation.
//! A response that parses but does not match the package schema is reported as
//! `AppError::InvalidPackage`, distinct from transport or API failures.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::package::RecruitmentPackage;
use crate::generation::prompts::{
    package_response_schema, GENERATION_THINKING_BUDGET, PACKAGE_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{HR_STRATEGIST_PERSONA, NOT_SPECIFIED};
use crate::llm_client::LlmClient;
use crate::models::form::{CompanyContext, DraftForm, ExperienceLevel};

pub const RAW_NOTES_REQUIRED: &str = "Please enter the key requirements or notes for the role.";

/// Request body for package generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub raw_notes: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub company_context: CompanyContext,
}

impl From<&DraftForm> for GenerateRequest {
    fn from(form: &DraftForm) -> Self {
        Self {
            raw_notes: form.raw_notes.clone(),
            experience_level: form.experience_level,
            company_context: form.company_context(),
        }
    }
}

/// Fills the generation prompt template from the request.
pub fn build_package_prompt(request: &GenerateRequest) -> String {
    let ctx = &request.company_context;
    let level = request.experience_level.label();

    let job_title_line = ctx
        .job_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Target Job Title: {t}"))
        .unwrap_or_default();
    let job_family_line = ctx
        .job_family
        .map(|f| format!("Job Family: {}", f.label()))
        .unwrap_or_default();

    PACKAGE_PROMPT_TEMPLATE
        .replace("{persona}", HR_STRATEGIST_PERSONA)
        .replace("{experience_level}", level)
        .replace("{job_title_line}", &job_title_line)
        .replace("{job_family_line}", &job_family_line)
        .replace("{mission_line}", &context_line("Mission", "Mission", &ctx.mission))
        .replace("{values_line}", &context_line("Core Values", "Values", &ctx.values))
        .replace("{culture_line}", &context_line("Culture", "Culture", &ctx.culture))
        .replace("{raw_notes}", request.raw_notes.trim())
}

/// `blank_label` is used when the value is empty; the values line is
/// labelled differently in that case.
fn context_line(label: &str, blank_label: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        format!("- {blank_label}: {NOT_SPECIFIED}")
    } else {
        format!("- {label}: {value}")
    }
}

/// Runs the generation call and validates the result against the package schema.
pub async fn generate_recruitment_package(
    llm: &LlmClient,
    request: &GenerateRequest,
) -> Result<RecruitmentPackage, AppError> {
    if request.raw_notes.trim().is_empty() {
        return Err(AppError::Validation(RAW_NOTES_REQUIRED.to_string()));
    }

    info!(
        "Generating recruitment package (level={}, notes_len={})",
        request.experience_level,
        request.raw_notes.len()
    );

    let prompt = build_package_prompt(request);
    let schema = package_response_schema();
    let text = llm
        .call_structured(&prompt, &schema, GENERATION_THINKING_BUDGET)
        .await
        .map_err(|e| AppError::Llm(format!("Package generation failed: {e}")))?;

    let package = RecruitmentPackage::from_json(&text).map_err(|e| {
        warn!("Generated package rejected: {e}");
        AppError::InvalidPackage(e.to_string())
    })?;

    info!(
        "Generated package '{}' with {} questions",
        package.job_title,
        package.interview_guide.len()
    );
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::JobFamily;

    fn request() -> GenerateRequest {
        GenerateRequest {
            raw_notes: "  Senior React dev, TypeScript, 5+ years.  ".to_string(),
            experience_level: ExperienceLevel::Senior,
            company_context: CompanyContext {
                mission: "Make hiring humane".to_string(),
                values: String::new(),
                culture: "Remote-first".to_string(),
                job_title: Some("Frontend Lead".to_string()),
                job_family: Some(JobFamily::Engineering),
            },
        }
    }

    #[test]
    fn test_prompt_includes_level_title_and_context() {
        let prompt = build_package_prompt(&request());
        assert!(prompt.starts_with(HR_STRATEGIST_PERSONA));
        assert!(prompt.contains("Target Experience Level: Senior-Level"));
        assert!(prompt.contains("Target Job Title: Frontend Lead"));
        assert!(prompt.contains("Job Family: Engineering"));
        assert!(prompt.contains("- Mission: Make hiring humane"));
        assert!(prompt.contains("- Values: Not specified"));
        assert!(!prompt.contains("Core Values"));
        assert!(prompt.contains("- Culture: Remote-first"));
        assert!(prompt.contains("\"Senior React dev, TypeScript, 5+ years.\""));
        assert!(!prompt.contains('{'), "unfilled placeholder in prompt");
    }

    #[test]
    fn test_prompt_omits_absent_title() {
        let mut req = request();
        req.company_context.job_title = Some("   ".to_string());
        req.company_context.job_family = None;
        let prompt = build_package_prompt(&req);
        assert!(!prompt.contains("Target Job Title"));
        assert!(!prompt.contains("Job Family"));
    }

    #[test]
    fn test_values_line_keeps_core_label_when_given() {
        let mut req = request();
        req.company_context.values = "Candor".to_string();
        req.company_context.mission = String::new();
        let prompt = build_package_prompt(&req);
        assert!(prompt.contains("- Core Values: Candor"));
        assert!(prompt.contains("- Mission: Not specified"));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: GenerateRequest = serde_json::from_str(r#"{"rawNotes":"notes"}"#).unwrap();
        assert_eq!(req.experience_level, ExperienceLevel::Mid);
        assert_eq!(req.company_context, CompanyContext::default());
    }

    #[test]
    fn test_request_from_draft_form_carries_context() {
        let form = DraftForm {
            raw_notes: "Staff data engineer".to_string(),
            input_job_title: " Data Lead ".to_string(),
            experience_level: ExperienceLevel::LeadExecutive,
            job_family: Some(JobFamily::Engineering),
            company_values: "Candor".to_string(),
            ..Default::default()
        };
        let req = GenerateRequest::from(&form);
        assert_eq!(req.experience_level, ExperienceLevel::LeadExecutive);
        assert_eq!(req.company_context.job_title.as_deref(), Some("Data Lead"));
        let prompt = build_package_prompt(&req);
        assert!(prompt.contains("Target Job Title: Data Lead"));
        assert!(prompt.contains("- Core Values: Candor"));
    }

    #[tokio::test]
    async fn test_empty_notes_rejected_before_any_call() {
        let llm = LlmClient::new("test".to_string(), "http://127.0.0.1:9".to_string()).unwrap();
        let mut req = request();
        req.raw_notes = " \n ".to_string();
        let err = generate_recruitment_package(&llm, &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == RAW_NOTES_REQUIRED));
    }
}
