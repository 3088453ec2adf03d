//! Markdown-to-structure interpreter.
//!
//! A single forward pass over the source lines. Four capture modes are mutually
//! exclusive: normal, code fence, list run and table run. Runs are contiguous
//! line constructs and close on the first line that does not continue them (an
//! empty line included). Inside a fence every line is captured verbatim until
//! the closing fence.
//!
//! The interpreter never fails. Anything it does not recognise is a paragraph.

use std::mem;

use tracing::debug;

use crate::markdown::blocks::{Block, BlockKind, Document, HeadingLevel, ListItem};
use crate::markdown::spans::parse_spans;

const FENCE: &str = "```";

/// Leading whitespace (in chars) from which a list item counts as nested.
const NESTED_INDENT: usize = 2;

enum Mode {
    Normal,
    Fence { open: usize, lines: Vec<String> },
    List { start: usize, items: Vec<ListItem> },
    Table { start: usize, rows: Vec<String> },
}

struct Interpreter {
    blocks: Vec<Block>,
    mode: Mode,
}

/// Interprets `source` into an ordered block sequence.
///
/// Pure function of its input: the same source always yields the same document.
pub fn interpret(source: &str) -> Document {
    let mut interpreter = Interpreter {
        blocks: Vec::new(),
        mode: Mode::Normal,
    };

    let mut total = 0;
    for (index, raw) in source.lines().enumerate() {
        interpreter.feed(index, raw);
        total = index + 1;
    }
    interpreter.finish(total)
}

impl Interpreter {
    fn feed(&mut self, index: usize, raw: &str) {
        let trimmed = raw.trim();

        if trimmed.starts_with(FENCE) {
            self.toggle_fence(index);
            return;
        }

        if let Mode::Fence { lines, .. } = &mut self.mode {
            lines.push(raw.to_string());
            return;
        }

        if trimmed.starts_with('|') {
            if matches!(self.mode, Mode::List { .. }) {
                self.flush(index);
            }
            match &mut self.mode {
                Mode::Table { rows, .. } => rows.push(trimmed.to_string()),
                _ => {
                    self.mode = Mode::Table {
                        start: index,
                        rows: vec![trimmed.to_string()],
                    }
                }
            }
            return;
        }

        if matches!(self.mode, Mode::Table { .. }) {
            self.flush(index);
        }

        if let Some(text) = list_item_text(trimmed) {
            let item = ListItem {
                spans: parse_spans(text),
                nested: leading_whitespace(raw) >= NESTED_INDENT,
            };
            match &mut self.mode {
                Mode::List { items, .. } => items.push(item),
                _ => {
                    self.mode = Mode::List {
                        start: index,
                        items: vec![item],
                    }
                }
            }
            return;
        }

        self.flush(index);

        if trimmed.is_empty() {
            return;
        }

        let kind = classify_single_line(trimmed);
        self.push(index..index + 1, kind);
    }

    fn toggle_fence(&mut self, index: usize) {
        match mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Fence { open, lines } => {
                self.push(open..index + 1, BlockKind::Code { lines });
            }
            other => {
                self.mode = other;
                self.flush(index);
                self.mode = Mode::Fence {
                    open: index,
                    lines: Vec::new(),
                };
            }
        }
    }

    /// Closes an open list or table run ending just before line `end`.
    fn flush(&mut self, end: usize) {
        match mem::replace(&mut self.mode, Mode::Normal) {
            Mode::List { start, items } => self.push(start..end, BlockKind::List { items }),
            Mode::Table { start, rows } => self.emit_table(start, rows),
            fence @ Mode::Fence { .. } => self.mode = fence,
            Mode::Normal => {}
        }
    }

    fn emit_table(&mut self, start: usize, rows: Vec<String>) {
        if rows.len() < 2 {
            // Without a separator row there is no table; keep the text as paragraphs.
            for (offset, row) in rows.into_iter().enumerate() {
                let line = start + offset;
                self.push(
                    line..line + 1,
                    BlockKind::Paragraph {
                        spans: parse_spans(&row),
                    },
                );
            }
            return;
        }

        let end = start + rows.len();
        let mut iter = rows.iter();
        let headers = iter.next().map(|r| split_cells(r)).unwrap_or_default();
        let rows = iter.skip(1).map(|r| split_cells(r)).collect();
        self.push(start..end, BlockKind::Table { headers, rows });
    }

    fn push(&mut self, source: std::ops::Range<usize>, kind: BlockKind) {
        self.blocks.push(Block { source, kind });
    }

    fn finish(mut self, total: usize) -> Document {
        if let Mode::Fence { open, lines } = &self.mode {
            debug!(
                "Unterminated code fence at line {} dropped ({} buffered lines)",
                open + 1,
                lines.len()
            );
            self.mode = Mode::Normal;
        }
        self.flush(total);
        Document {
            blocks: self.blocks,
        }
    }
}

/// Classifies a trimmed, non-empty line outside any run.
fn classify_single_line(trimmed: &str) -> BlockKind {
    if let Some(text) = trimmed.strip_prefix("> ") {
        return BlockKind::Blockquote {
            text: text.to_string(),
        };
    }

    if matches!(trimmed, "---" | "***" | "___") {
        return BlockKind::Rule;
    }

    let heading = [
        ("### ", HeadingLevel::H3),
        ("## ", HeadingLevel::H2),
        ("# ", HeadingLevel::H1),
    ]
    .into_iter()
    .find_map(|(marker, level)| trimmed.strip_prefix(marker).map(|rest| (level, rest)));

    match heading {
        Some((level, rest)) => BlockKind::Heading {
            level,
            spans: parse_spans(rest),
        },
        None => BlockKind::Paragraph {
            spans: parse_spans(trimmed),
        },
    }
}

fn list_item_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

fn leading_whitespace(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

/// Splits a pipe row into trimmed cells, dropping the empty cells produced by
/// the leading and trailing border pipes.
pub(crate) fn split_cells(row: &str) -> Vec<String> {
    let mut cells: Vec<String> = row.split('|').map(|c| c.trim().to_string()).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::spans::Span;

    fn kinds(source: &str) -> Vec<BlockKind> {
        interpret(source).blocks.into_iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_table_run_produces_headers_and_body() {
        let doc = interpret("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].source, 0..3);
        assert_eq!(
            doc.blocks[0].kind,
            BlockKind::Table {
                headers: vec!["A".to_string(), "B".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            }
        );
    }

    #[test]
    fn test_list_run_closed_by_following_line() {
        let doc = interpret("- one\n- two\nAfter the list");
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[0].kind {
            BlockKind::List { items } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].spans, vec![Span::plain("one")]);
                assert_eq!(items[1].spans, vec![Span::plain("two")]);
            }
            other => panic!("expected list, got {other:?}"),
        }
        assert_eq!(doc.blocks[0].source, 0..2);
        assert!(matches!(doc.blocks[1].kind, BlockKind::Paragraph { .. }));
        assert_eq!(doc.blocks[1].source, 2..3);
    }

    #[test]
    fn test_unterminated_fence_emits_no_code_block() {
        let doc = interpret("Intro\n```\nlet x = 1;\nstill code");
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc
            .blocks
            .iter()
            .all(|b| !matches!(b.kind, BlockKind::Code { .. })));
    }

    #[test]
    fn test_fence_captures_raw_lines_verbatim() {
        let doc = interpret("```rust\n# not a heading\n  - not a list\n```");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].source, 0..4);
        assert_eq!(
            doc.blocks[0].kind,
            BlockKind::Code {
                lines: vec!["# not a heading".to_string(), "  - not a list".to_string()],
            }
        );
    }

    #[test]
    fn test_opening_fence_flushes_open_list() {
        let k = kinds("- item\n```\ncode\n```");
        assert!(matches!(k[0], BlockKind::List { .. }));
        assert!(matches!(k[1], BlockKind::Code { .. }));
    }

    #[test]
    fn test_heading_precedence_and_spans() {
        let k = kinds("# One\n## Two\n### **Three** x\n#### Four");
        assert_eq!(
            k[0],
            BlockKind::Heading {
                level: HeadingLevel::H1,
                spans: vec![Span::plain("One")]
            }
        );
        assert!(matches!(
            k[1],
            BlockKind::Heading {
                level: HeadingLevel::H2,
                ..
            }
        ));
        assert_eq!(
            k[2],
            BlockKind::Heading {
                level: HeadingLevel::H3,
                spans: vec![Span::bold("Three"), Span::plain(" x")]
            }
        );
        assert!(matches!(k[3], BlockKind::Paragraph { .. }));
    }

    #[test]
    fn test_rules_and_blockquote() {
        let k = kinds("---\n***\n___\n> Be kind");
        assert_eq!(&k[..3], &[BlockKind::Rule, BlockKind::Rule, BlockKind::Rule]);
        assert_eq!(
            k[3],
            BlockKind::Blockquote {
                text: "Be kind".to_string()
            }
        );
    }

    #[test]
    fn test_nested_list_items_are_flagged() {
        let doc = interpret("- top\n  - child\n - one space");
        let BlockKind::List { items } = &doc.blocks[0].kind else {
            panic!("expected list");
        };
        assert_eq!(
            items.iter().map(|i| i.nested).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_table_flushes_list_and_list_flushes_table() {
        let k = kinds("- a\n| h |\n|---|\n- b");
        assert!(matches!(k[0], BlockKind::List { .. }));
        assert!(matches!(k[1], BlockKind::Table { .. }));
        assert!(matches!(k[2], BlockKind::List { .. }));
    }

    #[test]
    fn test_single_row_table_degrades_to_paragraph() {
        let doc = interpret("| lonely |\nnext");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(
            doc.blocks[0].kind,
            BlockKind::Paragraph {
                spans: vec![Span::plain("| lonely |")]
            }
        );
    }

    #[test]
    fn test_empty_line_splits_list_runs() {
        let k = kinds("- a\n\n- b");
        assert_eq!(k.len(), 2);
        assert!(k.iter().all(|b| matches!(b, BlockKind::List { .. })));
    }

    #[test]
    fn test_split_cells_drops_border_cells_only() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("| a | b"), vec!["a", "b"]);
        assert_eq!(split_cells("| a |  | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_source_ranges_are_ordered_and_disjoint() {
        let source = "# Title\n\n- a\n- b\n| x | y |\n|---|---|\n| 1 | 2 |\n```\ncode\n```\n> quote\n---\ntext\n| solo |";
        let doc = interpret(source);
        let mut prev_end = 0;
        for block in &doc.blocks {
            assert!(block.source.start >= prev_end, "overlap at {:?}", block.source);
            assert!(block.source.end > block.source.start);
            prev_end = block.source.end;
        }
        assert!(prev_end <= source.lines().count());
    }

    #[test]
    fn test_text_rows_preserve_source_order() {
        let source = "Alpha\n- Bravo\n- **Charlie**\n| Delta | Echo |\n|---|---|\n| Foxtrot | Golf |\n> Hotel\n```\nIndia\n```\n### Juliet";
        let rows = interpret(source).text_rows().join("\n");
        let order = [
            "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
            "Juliet",
        ];
        let positions: Vec<usize> = order.iter().map(|w| rows.find(w).unwrap()).collect();
        assert!(positions.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_interpretation_is_idempotent() {
        let source = "## Role\n- **Ship** features\n  - nested\n| a | b |\n|-|-|\n| 1 | 2 |\n```\nx\n";
        assert_eq!(interpret(source), interpret(source));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(interpret("").is_empty());
        assert!(interpret("\n   \n\t\n").is_empty());
    }
}
