//! Recruitment package: the bundle the generation model returns and every
//! presenter (view, copy text, PDF export, chat context) consumes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markdown::{interpret, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub question: String,
    /// The skill or trait being assessed, e.g. "Conflict Resolution".
    pub focus_area: String,
    pub rationale: String,
}

/// Generated job title, responsibilities, description and interview guide.
///
/// `key_responsibilities` and `header_image_url` were added after the first
/// saved results were written; both default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentPackage {
    pub job_title: String,
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
    /// Markdown source in the restricted dialect.
    pub job_description: String,
    pub interview_guide: Vec<InterviewQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("package does not match schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("interview question {index} has an empty `{field}`")]
    EmptyQuestionField { index: usize, field: &'static str },
}

impl RecruitmentPackage {
    /// Parses and validates a JSON payload produced by the model.
    pub fn from_json(text: &str) -> Result<Self, PackageError> {
        let package: RecruitmentPackage = serde_json::from_str(text)?;
        package.validate()?;
        Ok(package)
    }

    /// Checks the invariants serde cannot express: required strings are non-blank.
    pub fn validate(&self) -> Result<(), PackageError> {
        if self.job_title.trim().is_empty() {
            return Err(PackageError::EmptyField("jobTitle"));
        }
        if self.job_description.trim().is_empty() {
            return Err(PackageError::EmptyField("jobDescription"));
        }
        for (index, q) in self.interview_guide.iter().enumerate() {
            let blank = [
                ("question", &q.question),
                ("focusArea", &q.focus_area),
                ("rationale", &q.rationale),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());
            if let Some((field, _)) = blank {
                return Err(PackageError::EmptyQuestionField { index, field });
            }
        }
        Ok(())
    }

    /// The job description interpreted into blocks.
    pub fn description_document(&self) -> Document {
        interpret(&self.job_description)
    }

    /// The only mutation a package allows after creation.
    pub fn attach_header_image(&mut self, url: String) {
        self.header_image_url = Some(url);
    }
}
