//! Plain-text copies of a package and the share link / email draft.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::package::RecruitmentPackage;

pub const SHARE_BASE_URL: &str = "https://recruitai.sandbox/share/";
const SHARE_ID_LEN: usize = 8;

/// Which tab of the result view a copy action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "JD")]
    JobDescription,
    #[serde(rename = "GUIDE")]
    InterviewGuide,
}

/// Text placed on the clipboard by the per-tab copy button.
pub fn copy_text(package: &RecruitmentPackage, view: ViewMode) -> String {
    match view {
        ViewMode::JobDescription => package.job_description.clone(),
        ViewMode::InterviewGuide => package
            .interview_guide
            .iter()
            .map(|q| {
                format!(
                    "Q: {}\nFocus: {}\nRationale: {}",
                    q.question, q.focus_area, q.rationale
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// The whole package as one plain-text document.
pub fn copy_all_text(package: &RecruitmentPackage) -> String {
    let mut out = format!("JOB TITLE: {}\n\n", package.job_title);

    if !package.key_responsibilities.is_empty() {
        out.push_str("=== KEY RESPONSIBILITIES ===\n\n");
        for r in &package.key_responsibilities {
            out.push_str(&format!("- {r}\n"));
        }
        out.push('\n');
    }

    out.push_str("=== JOB DESCRIPTION ===\n\n");
    out.push_str(&package.job_description);
    out.push_str("\n\n=== INTERVIEW GUIDE ===\n\n");

    let guide = package
        .interview_guide
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "{}. {}\n   Focus: {}\n   Rationale: {}",
                i + 1,
                q.question,
                q.focus_area,
                q.rationale
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push_str(&guide);
    out
}

/// Short random identifier for a share link.
pub fn new_share_id() -> String {
    Uuid::new_v4().simple().to_string()[..SHARE_ID_LEN].to_string()
}

pub fn share_url(share_id: &str) -> String {
    format!("{SHARE_BASE_URL}{share_id}")
}

/// `mailto:` link with a prefilled subject and body.
pub fn mailto_link(package: &RecruitmentPackage, share_url: &str) -> String {
    let subject = format!("Recruitment Package: {}", package.job_title);
    let body = format!(
        "Here is the recruitment package for the {} role.\n\nCheck it out here: {}\n\n-- Generated by RecruitAI",
        package.job_title, share_url
    );
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// Everything the share menu offers for one package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareBundle {
    pub share_url: String,
    pub mailto: String,
    pub job_description_text: String,
    pub interview_guide_text: String,
    pub all_text: String,
}

impl ShareBundle {
    pub fn build(package: &RecruitmentPackage) -> Self {
        let share_url = share_url(&new_share_id());
        Self {
            mailto: mailto_link(package, &share_url),
            share_url,
            job_description_text: copy_text(package, ViewMode::JobDescription),
            interview_guide_text: copy_text(package, ViewMode::InterviewGuide),
            all_text: copy_all_text(package),
        }
    }
}
