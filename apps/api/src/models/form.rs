use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Seniority the generated content is pitched at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry-Level")]
    Entry,
    #[default]
    #[serde(rename = "Mid-Level")]
    Mid,
    #[serde(rename = "Senior-Level")]
    Senior,
    #[serde(rename = "Lead/Executive")]
    LeadExecutive,
}

impl ExperienceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry-Level",
            ExperienceLevel::Mid => "Mid-Level",
            ExperienceLevel::Senior => "Senior-Level",
            ExperienceLevel::LeadExecutive => "Lead/Executive",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobFamily {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Product,
    Design,
    Operations,
    Legal,
    Other,
}

impl JobFamily {
    pub fn label(self) -> &'static str {
        match self {
            JobFamily::Engineering => "Engineering",
            JobFamily::Marketing => "Marketing",
            JobFamily::Sales => "Sales",
            JobFamily::Hr => "HR",
            JobFamily::Finance => "Finance",
            JobFamily::Product => "Product",
            JobFamily::Design => "Design",
            JobFamily::Operations => "Operations",
            JobFamily::Legal => "Legal",
            JobFamily::Other => "Other",
        }
    }
}

/// Optional company details woven into the generated description and questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyContext {
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub values: String,
    #[serde(default)]
    pub culture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_family: Option<JobFamily>,
}

/// Everything the role-definition form holds. Persisted as the auto-saved
/// state and as the manual draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftForm {
    pub raw_notes: String,
    pub input_job_title: String,
    pub experience_level: ExperienceLevel,
    #[serde(deserialize_with = "blank_job_family")]
    pub job_family: Option<JobFamily>,
    pub company_mission: String,
    pub company_values: String,
    pub company_culture: String,
}

/// Older drafts store an unselected job family as `""`.
fn blank_job_family<'de, D>(deserializer: D) -> Result<Option<JobFamily>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(other) => JobFamily::deserialize(serde::de::value::StrDeserializer::new(other))
            .map(Some),
    }
}

impl DraftForm {
    pub fn company_context(&self) -> CompanyContext {
        let title = self.input_job_title.trim();
        CompanyContext {
            mission: self.company_mission.clone(),
            values: self.company_values.clone(),
            culture: self.company_culture.clone(),
            job_title: (!title.is_empty()).then(|| title.to_string()),
            job_family: self.job_family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_wire_names() {
        let level: ExperienceLevel = serde_json::from_str(r#""Lead/Executive""#).unwrap();
        assert_eq!(level, ExperienceLevel::LeadExecutive);
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::Entry).unwrap(),
            r#""Entry-Level""#
        );
        assert_eq!(ExperienceLevel::default().to_string(), "Mid-Level");
    }

    #[test]
    fn test_job_family_hr_wire_name() {
        let family: JobFamily = serde_json::from_str(r#""HR""#).unwrap();
        assert_eq!(family, JobFamily::Hr);
        assert_eq!(family.label(), "HR");
    }

    #[test]
    fn test_partial_draft_uses_defaults() {
        let draft: DraftForm = serde_json::from_str(r#"{"rawNotes":"Need a PM"}"#).unwrap();
        assert_eq!(draft.raw_notes, "Need a PM");
        assert_eq!(draft.experience_level, ExperienceLevel::Mid);
        assert!(draft.job_family.is_none());
    }

    #[test]
    fn test_blank_job_family_reads_as_none() {
        let draft: DraftForm =
            serde_json::from_str(r#"{"jobFamily":"","timestamp":1700000000000}"#).unwrap();
        assert!(draft.job_family.is_none());
        let draft: DraftForm = serde_json::from_str(r#"{"jobFamily":"HR"}"#).unwrap();
        assert_eq!(draft.job_family, Some(JobFamily::Hr));
        assert!(serde_json::from_str::<DraftForm>(r#"{"jobFamily":"Astrology"}"#).is_err());
    }

    #[test]
    fn test_company_context_drops_blank_title() {
        let draft = DraftForm {
            input_job_title: "  ".to_string(),
            company_mission: "Organize information".to_string(),
            ..Default::default()
        };
        let ctx = draft.company_context();
        assert!(ctx.job_title.is_none());
        assert_eq!(ctx.mission, "Organize information");
    }
}
