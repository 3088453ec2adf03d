//! Header banner for a package: a deterministic gradient derived from the job
//! title, plus an optional generated illustration.

use serde::Serialize;
use tracing::{info, warn};

use crate::generation::prompts::BANNER_PROMPT_TEMPLATE;
use crate::llm_client::LlmClient;

/// Three hues (degrees) derived from a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BannerPalette {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
}

/// String hash over UTF-16 code units, `hash = c + ((hash << 5) - hash)`,
/// where the shift operates on the low 32 bits of the running value.
fn title_hash(title: &str) -> i64 {
    title.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        i64::from(unit) + (shifted - hash)
    })
}

impl BannerPalette {
    pub fn from_title(title: &str) -> Self {
        let h1 = (title_hash(title).unsigned_abs() % 360) as u32;
        Self {
            h1,
            h2: (h1 + 40) % 360,
            h3: (h1 + 200) % 360,
        }
    }

    /// CSS background for the banner when no illustration is available.
    pub fn css_background(&self) -> String {
        let Self { h1, h2, h3 } = *self;
        format!(
            "radial-gradient(circle at 10% 20%, hsla({h1}, 70%, 60%, 0.8) 0%, transparent 20%), \
             radial-gradient(circle at 90% 80%, hsla({h2}, 70%, 50%, 0.8) 0%, transparent 20%), \
             linear-gradient(135deg, hsl({h1}, 80%, 90%), hsl({h3}, 30%, 95%))"
        )
    }
}

/// Asks the image model for a banner. Failures are logged and yield `None`;
/// the gradient stays in place.
pub async fn generate_header_image(llm: &LlmClient, job_title: &str) -> Option<String> {
    let prompt = BANNER_PROMPT_TEMPLATE.replace("{job_title}", job_title);
    match llm.generate_image(&prompt).await {
        Ok(Some(image)) => {
            info!("Header image generated ({})", image.mime_type);
            Some(image.to_data_url())
        }
        Ok(None) => {
            warn!("Image model returned no image for '{job_title}'");
            None
        }
        Err(e) => {
            warn!("Header image generation failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_hashes_to_zero() {
        let palette = BannerPalette::from_title("");
        assert_eq!(palette, BannerPalette { h1: 0, h2: 40, h3: 200 });
    }

    #[test]
    fn test_known_palettes() {
        assert_eq!(
            BannerPalette::from_title("A"),
            BannerPalette { h1: 65, h2: 105, h3: 265 }
        );
        // 66 + (65 << 5) - 65 = 2081
        assert_eq!(
            BannerPalette::from_title("AB"),
            BannerPalette { h1: 281, h2: 321, h3: 121 }
        );
    }

    #[test]
    fn test_long_titles_stay_in_range() {
        let title = "Principal Distributed Systems Engineer, Storage Infrastructure ".repeat(20);
        let palette = BannerPalette::from_title(&title);
        assert!(palette.h1 < 360 && palette.h2 < 360 && palette.h3 < 360);
        assert_eq!(palette, BannerPalette::from_title(&title));
    }

    #[test]
    fn test_css_background_uses_all_hues() {
        let css = BannerPalette { h1: 10, h2: 50, h3: 210 }.css_background();
        assert_eq!(
            css,
            "radial-gradient(circle at 10% 20%, hsla(10, 70%, 60%, 0.8) 0%, transparent 20%), \
             radial-gradient(circle at 90% 80%, hsla(50, 70%, 50%, 0.8) 0%, transparent 20%), \
             linear-gradient(135deg, hsl(10, 80%, 90%), hsl(210, 30%, 95%))"
        );
    }
}
