//! Emphasis span extraction for the `**bold**` subset of the dialect.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Non-greedy, left-to-right, non-overlapping bold delimiter pair.
static BOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*.*?\*\*").expect("bold pattern is a valid regex"));

/// A fragment of inline text, either bold or plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Splits a line of text into bold and plain spans.
///
/// Matches of `\*\*.*?\*\*` become bold spans with the delimiters stripped; the
/// text between matches becomes plain spans. Empty fragments are dropped, so
/// `"****"` yields nothing and an unmatched `**` stays in a plain span verbatim.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for m in BOLD_PATTERN.find_iter(text) {
        if m.start() > cursor {
            spans.push(Span::plain(&text[cursor..m.start()]));
        }
        let inner = &m.as_str()[2..m.as_str().len() - 2];
        if !inner.is_empty() {
            spans.push(Span::bold(inner));
        }
        cursor = m.end();
    }

    if cursor < text.len() {
        spans.push(Span::plain(&text[cursor..]));
    }

    spans
}

/// Concatenates span text, dropping emphasis.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
