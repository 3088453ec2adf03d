//! Structured document model produced by the interpreter and consumed by every
//! presenter (HTML view, plain-text copy, paginated export).

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::markdown::spans::{plain_text, Span};

/// Heading depth. The dialect only knows `#`, `##` and `###`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("heading level must be 1..=3, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub spans: Vec<Span>,
    /// Set when the raw line carried two or more leading whitespace characters.
    /// Nesting is binary: there is no deeper level.
    pub nested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading {
        level: HeadingLevel,
        spans: Vec<Span>,
    },
    List {
        items: Vec<ListItem>,
    },
    /// Raw fenced lines, no markup interpretation. The fence info string is ignored.
    Code {
        lines: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Blockquote {
        text: String,
    },
    Rule,
    Paragraph {
        spans: Vec<Span>,
    },
}

/// One typed node plus the half-open range of source lines it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub source: Range<usize>,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Textual content of the block, one entry per logical row, emphasis dropped.
    pub fn text_rows(&self) -> Vec<String> {
        match &self.kind {
            BlockKind::Heading { spans, .. } | BlockKind::Paragraph { spans } => {
                vec![plain_text(spans)]
            }
            BlockKind::List { items } => items.iter().map(|i| plain_text(&i.spans)).collect(),
            BlockKind::Code { lines } => lines.clone(),
            BlockKind::Table { headers, rows } => std::iter::once(headers)
                .chain(rows.iter())
                .map(|cells| cells.join(" "))
                .collect(),
            BlockKind::Blockquote { text } => vec![text.clone()],
            BlockKind::Rule => Vec::new(),
        }
    }
}

/// Ordered block sequence for one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All textual rows of all blocks, in document order.
    pub fn text_rows(&self) -> Vec<String> {
        self.blocks.iter().flat_map(Block::text_rows).collect()
    }

    /// Number of source lines that separate `index` from the previous block
    /// (or from the start of input for the first block).
    pub fn gap_before(&self, index: usize) -> usize {
        let Some(block) = self.blocks.get(index) else {
            return 0;
        };
        let prev_end = match index {
            0 => 0,
            i => self.blocks[i - 1].source.end,
        };
        block.source.start.saturating_sub(prev_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_serializes_as_number() {
        let block = Block {
            source: 0..1,
            kind: BlockKind::Heading {
                level: HeadingLevel::H2,
                spans: vec![Span::plain("About")],
            },
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["source"]["start"], 0);
    }

    #[test]
    fn test_heading_level_rejects_out_of_range() {
        assert!(HeadingLevel::try_from(4).is_err());
        assert_eq!(HeadingLevel::try_from(3).unwrap(), HeadingLevel::H3);
    }

    #[test]
    fn test_block_deserializes_from_flattened_json() {
        let json = r#"{"source":{"start":2,"end":3},"type":"blockquote","text":"hi"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.source, 2..3);
        assert_eq!(
            block.kind,
            BlockKind::Blockquote {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_gap_before_counts_separator_lines() {
        let doc = Document {
            blocks: vec![
                Block {
                    source: 1..2,
                    kind: BlockKind::Rule,
                },
                Block {
                    source: 4..5,
                    kind: BlockKind::Rule,
                },
            ],
        };
        assert_eq!(doc.gap_before(0), 1);
        assert_eq!(doc.gap_before(1), 2);
        assert_eq!(doc.gap_before(9), 0);
    }
}
