// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// Thinking budget for package synthesis. Output tokens are left uncapped so a
/// long answer is not cut off after thinking.
pub const GENERATION_THINKING_BUDGET: u32 = 32768;

/// Lower budget keeps chat turns responsive.
pub const CHAT_THINKING_BUDGET: u32 = 1024;

/// Package generation prompt template.
/// Replace: {persona}, {experience_level}, {job_title_line}, {mission_line},
///          {values_line}, {culture_line}, {job_family_line}, {raw_notes}
pub const PACKAGE_PROMPT_TEMPLATE: &str = r#"{persona}
Analyze the following raw notes for a job role and create a comprehensive recruitment package.

Target Experience Level: {experience_level}
{job_title_line}
{job_family_line}

Company Context:
{mission_line}
{values_line}
{culture_line}

Raw Notes:
"{raw_notes}"

You must generate three things:
1. A short list of the key responsibilities of the role, one sentence each.

2. A polished, professional LinkedIn-ready Job Description (Markdown formatted).
   - It MUST be tailored to the "{experience_level}" level in terms of language complexity, responsibility scope, and requirements.
   - If company context is provided, you MUST weave the mission, values, and culture into the description to attract culturally aligned candidates.
   - Use only headings (#, ##, ###), bullet lists (- ), bold (**text**), tables, blockquotes and plain paragraphs.

3. An Interview Guide with 10 behavioral questions.
   - The complexity and depth of the questions MUST match the "{experience_level}" level.
   - Questions must target the specific hard and soft skills identified in the JD.
   - Include questions that assess fit with the provided Core Values and Culture."#;

/// Chat system instruction when a package is available.
/// Replace: {persona}, {context}
pub const CHAT_CONTEXT_SYSTEM_TEMPLATE: &str = "{persona} \n\nCONTEXT FROM GENERATED JOB DESCRIPTION:\n{context}\n\nUse the above context to answer the user's questions about the role.";

/// Header image prompt template. Replace: {job_title}
pub const BANNER_PROMPT_TEMPLATE: &str = "A modern, abstract, professional banner illustration for a job posting titled \"{job_title}\". \
    Wide aspect ratio, soft gradients, no text, no people's faces.";

/// Response schema sent with the generation request. Mirrors `RecruitmentPackage`.
pub fn package_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "jobTitle": {
                "type": "STRING",
                "description": "A catchy, professional job title."
            },
            "keyResponsibilities": {
                "type": "ARRAY",
                "description": "The key responsibilities of the role.",
                "items": { "type": "STRING" }
            },
            "jobDescription": {
                "type": "STRING",
                "description": "The full job description in Markdown format."
            },
            "interviewGuide": {
                "type": "ARRAY",
                "description": "List of 10 behavioral interview questions.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "focusArea": {
                            "type": "STRING",
                            "description": "The skill or trait being assessed (e.g., 'Conflict Resolution')."
                        },
                        "rationale": {
                            "type": "STRING",
                            "description": "Why this question is relevant to the JD and Level."
                        }
                    },
                    "required": ["question", "focusArea", "rationale"]
                }
            }
        },
        "required": ["jobTitle", "keyResponsibilities", "jobDescription", "interviewGuide"]
    })
}
