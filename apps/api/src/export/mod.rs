// Package export: PDF download and the share/copy affordances.
// PDF composition is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod share;

/// Download name for a package PDF. Every character outside `[A-Za-z0-9]`
/// becomes `_` (one per UTF-16 unit), then the name is lowercased.
pub fn export_filename(job_title: &str) -> String {
    let slug: String = job_title
        .chars()
        .flat_map(|c| {
            if c.is_ascii_alphanumeric() {
                std::iter::repeat(c.to_ascii_lowercase()).take(1)
            } else {
                std::iter::repeat('_').take(c.len_utf16())
            }
        })
        .collect();
    format!("{slug}_recruitai.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_replaces_punctuation_and_lowercases() {
        assert_eq!(
            export_filename("Senior, Product Manager!"),
            "senior__product_manager__recruitai.pdf"
        );
    }

    #[test]
    fn test_filename_for_non_ascii_title() {
        assert_eq!(export_filename("Café Lead"), "caf__lead_recruitai.pdf");
        // Astral characters occupy two UTF-16 units.
        assert_eq!(export_filename("🚀"), "___recruitai.pdf");
    }

    #[test]
    fn test_filename_for_empty_title() {
        assert_eq!(export_filename(""), "_recruitai.pdf");
    }
}
