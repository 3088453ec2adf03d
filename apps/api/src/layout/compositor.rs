//! Paginated compositor: lays a recruitment package onto fixed-size pages.
//!
//! # Architecture
//! - `compose_package` is the entry point. It is synchronous and CPU-bound;
//!   async callers run it inside `tokio::task::spawn_blocking`.
//! - `PageBuffer` owns the vertical cursor, the current page and the break rule:
//!   before drawing anything of height `h`, `y + h > page_height - margin`
//!   starts a new page with `y` back at the top margin.
//! - The job description is not re-tokenized here. Body layout walks the same
//!   `Document` the interactive view renders.
//!
//! Coordinates are millimetres from the top-left corner; text `y` is the baseline.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::generation::package::RecruitmentPackage;
use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::markdown::{plain_text, BlockKind, Document, HeadingLevel};

/// Space below which a new interview question starts on a fresh page.
/// An estimate: the real height is only known after wrapping.
pub const QUESTION_BLOCK_THRESHOLD_MM: f32 = 45.0;

/// Smallest printable height a page config may have: one question block
/// plus room for the heading that precedes it.
pub const MIN_PRINTABLE_HEIGHT_MM: f32 = 1.5 * QUESTION_BLOCK_THRESHOLD_MM;

/// Vertical space contributed by each blank source line between blocks.
const BLANK_LINE_MM: f32 = 6.0;

const BODY_SIZE_PT: f32 = 11.0;
const BODY_LINE_MM: f32 = 5.5;
const MONO_SIZE_PT: f32 = 9.0;
const CODE_LINE_MM: f32 = 4.5;
const LIST_INDENT_MM: f32 = 5.0;
const NESTED_LIST_INDENT_MM: f32 = 10.0;
const RULE_HEIGHT_MM: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

const INDIGO: Rgb = Rgb(79, 70, 229);
const SLATE_800: Rgb = Rgb(30, 41, 59);
const SLATE_700: Rgb = Rgb(51, 65, 85);
const SLATE_600: Rgb = Rgb(71, 85, 105);
const SLATE_300: Rgb = Rgb(203, 213, 225);

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text {
        x_mm: f32,
        y_mm: f32,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
        text: String,
    },
    Rule {
        x1_mm: f32,
        x2_mm: f32,
        y_mm: f32,
        color: Rgb,
    },
}

#[cfg(test)]
impl DrawOp {
    pub fn y_mm(&self) -> f32 {
        match self {
            DrawOp::Text { y_mm, .. } | DrawOp::Rule { y_mm, .. } => *y_mm,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Pages ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedDocument {
    pub title: String,
    pub config: PageConfig,
    pub pages: Vec<Page>,
}

#[cfg(test)]
impl ComposedDocument {
    /// Every text string on `page`, in drawing order.
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|p| {
                p.ops
                    .iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        DrawOp::Rule { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid page configuration: {0}")]
    InvalidPageConfig(String),

    #[error("export task failed: {0}")]
    Task(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Page buffer
// ────────────────────────────────────────────────────────────────────────────

/// Style of one run of wrapped lines.
#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: FontFace,
    size_pt: f32,
    color: Rgb,
    line_mm: f32,
}

impl TextStyle {
    const fn new(face: FontFace, size_pt: f32, color: Rgb, line_mm: f32) -> Self {
        Self {
            face,
            size_pt,
            color,
            line_mm,
        }
    }
}

const BODY: TextStyle =
    TextStyle::new(FontFace::Helvetica, BODY_SIZE_PT, SLATE_700, BODY_LINE_MM);

/// Per-export cursor state. Created for one composition, consumed by `finish`.
pub struct PageBuffer {
    config: PageConfig,
    pages: Vec<Page>,
    y: f32,
}

impl PageBuffer {
    pub fn new(config: PageConfig) -> Result<Self, ExportError> {
        if config.content_width_mm() <= 2.0 * NESTED_LIST_INDENT_MM {
            return Err(ExportError::InvalidPageConfig(format!(
                "content width {:.1}mm leaves no room for text",
                config.content_width_mm()
            )));
        }
        let printable_mm = config.bottom_limit_mm() - config.top_mm;
        if config.top_mm < 0.0 || printable_mm < MIN_PRINTABLE_HEIGHT_MM {
            return Err(ExportError::InvalidPageConfig(format!(
                "printable height {printable_mm:.1}mm is too small"
            )));
        }
        let y = config.top_mm;
        Ok(Self {
            config,
            pages: vec![Page::default()],
            y,
        })
    }

    #[cfg(test)]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[cfg(test)]
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn remaining(&self) -> f32 {
        self.config.bottom_limit_mm() - self.y
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.config.top_mm;
    }

    /// Starts a new page if `height` does not fit below the cursor.
    pub fn check_page_break(&mut self, height: f32) {
        if self.y + height > self.config.bottom_limit_mm() {
            self.new_page();
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn printable_height(&self) -> f32 {
        self.config.bottom_limit_mm() - self.config.top_mm
    }

    /// Wraps `text` to the content width minus `indent` and draws it.
    fn draw_wrapped(&mut self, text: &str, indent: f32, style: TextStyle) {
        let width = self.config.content_width_mm() - indent;
        let lines = get_metrics(style.face).wrap_text(text, width, style.size_pt);
        self.draw_lines(lines, indent, style);
    }

    /// Draws pre-wrapped lines. The run is kept on one page when it fits on a
    /// page at all; otherwise it flows line by line across pages.
    fn draw_lines(&mut self, lines: Vec<String>, indent: f32, style: TextStyle) {
        let total = lines.len() as f32 * style.line_mm;
        if total <= self.printable_height() {
            self.check_page_break(total);
        }
        let x = self.config.margin_mm + indent;
        for text in lines {
            self.check_page_break(style.line_mm);
            let y = self.y;
            self.current_page().ops.push(DrawOp::Text {
                x_mm: x,
                y_mm: y,
                face: style.face,
                size_pt: style.size_pt,
                color: style.color,
                text,
            });
            self.y += style.line_mm;
        }
    }

    fn draw_rule(&mut self) {
        self.check_page_break(RULE_HEIGHT_MM);
        let y = self.y + RULE_HEIGHT_MM / 3.0;
        let x1 = self.config.margin_mm;
        let x2 = self.config.page_width_mm - self.config.margin_mm;
        self.current_page().ops.push(DrawOp::Rule {
            x1_mm: x1,
            x2_mm: x2,
            y_mm: y,
            color: SLATE_300,
        });
        self.y += RULE_HEIGHT_MM;
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn finish(self, title: String) -> ComposedDocument {
        ComposedDocument {
            title,
            config: self.config,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Composes the full export: title, responsibilities, description body, then
/// the interview guide starting on its own page.
pub fn compose_package(
    package: &RecruitmentPackage,
    config: &PageConfig,
) -> Result<ComposedDocument, ExportError> {
    let mut buf = PageBuffer::new(config.clone())?;

    // Title block
    buf.draw_wrapped(
        &package.job_title,
        0.0,
        TextStyle::new(FontFace::HelveticaBold, 22.0, INDIGO, 8.0),
    );
    buf.advance(15.0);

    if !package.key_responsibilities.is_empty() {
        section_heading(&mut buf, "Key Responsibilities");
        for item in &package.key_responsibilities {
            buf.draw_wrapped(&bullet(item), LIST_INDENT_MM, BODY);
        }
        buf.advance(BLANK_LINE_MM);
    }

    section_heading(&mut buf, "Job Description");
    compose_body(&mut buf, &package.description_document());

    buf.new_page();
    buf.draw_lines(
        vec!["Interview Guide".to_string()],
        0.0,
        TextStyle::new(FontFace::HelveticaBold, 18.0, INDIGO, 15.0),
    );

    for (i, q) in package.interview_guide.iter().enumerate() {
        if buf.remaining() < QUESTION_BLOCK_THRESHOLD_MM {
            buf.new_page();
        }
        buf.draw_wrapped(
            &format!("{}. {}", i + 1, q.question),
            0.0,
            TextStyle::new(FontFace::HelveticaBold, 12.0, SLATE_800, 6.0),
        );
        buf.advance(4.0);
        buf.draw_wrapped(
            &format!("Focus: {}", q.focus_area),
            LIST_INDENT_MM,
            TextStyle::new(FontFace::HelveticaOblique, 10.0, INDIGO, 6.0),
        );
        buf.draw_wrapped(
            &format!("Rationale: {}", q.rationale),
            LIST_INDENT_MM,
            TextStyle::new(FontFace::Helvetica, 10.0, SLATE_600, 5.0),
        );
        buf.advance(12.0);
    }

    let composed = buf.finish(package.job_title.clone());
    debug!(
        "Composed export for '{}': {} pages",
        composed.title,
        composed.pages.len()
    );
    Ok(composed)
}

fn section_heading(buf: &mut PageBuffer, text: &str) {
    buf.draw_lines(
        vec![text.to_string()],
        0.0,
        TextStyle::new(FontFace::HelveticaBold, 16.0, SLATE_800, 12.0),
    );
}

fn bullet(text: &str) -> String {
    format!("•  {text}")
}

/// Lays out the description blocks. Bold spans are flattened to plain text:
/// a line is drawn in a single face.
pub fn compose_body(buf: &mut PageBuffer, doc: &Document) {
    for (index, block) in doc.blocks.iter().enumerate() {
        buf.advance(doc.gap_before(index) as f32 * BLANK_LINE_MM);

        match &block.kind {
            BlockKind::Heading { level, spans } => {
                let (space_above, size_pt, line_mm) = match level {
                    HeadingLevel::H1 => (10.0, 16.0, 8.0),
                    HeadingLevel::H2 => (8.0, 14.0, 7.0),
                    HeadingLevel::H3 => (5.0, 12.0, 6.0),
                };
                buf.advance(space_above);
                buf.draw_wrapped(
                    &plain_text(spans),
                    0.0,
                    TextStyle::new(FontFace::HelveticaBold, size_pt, SLATE_800, line_mm),
                );
            }
            BlockKind::List { items } => {
                for item in items {
                    let indent = if item.nested {
                        NESTED_LIST_INDENT_MM
                    } else {
                        LIST_INDENT_MM
                    };
                    buf.draw_wrapped(&bullet(&plain_text(&item.spans)), indent, BODY);
                }
            }
            BlockKind::Code { lines } => {
                let mono =
                    TextStyle::new(FontFace::Courier, MONO_SIZE_PT, SLATE_800, CODE_LINE_MM);
                let width = buf.config.content_width_mm() - LIST_INDENT_MM;
                let metrics = get_metrics(FontFace::Courier);
                let wrapped: Vec<String> = lines
                    .iter()
                    .flat_map(|l| metrics.wrap_text(l, width, MONO_SIZE_PT))
                    .collect();
                buf.draw_lines(wrapped, LIST_INDENT_MM, mono);
            }
            BlockKind::Table { headers, rows } => {
                let mono =
                    TextStyle::new(FontFace::Courier, MONO_SIZE_PT, SLATE_700, BODY_LINE_MM);
                for cells in std::iter::once(headers).chain(rows.iter()) {
                    buf.draw_wrapped(&cells.join("   "), 0.0, mono);
                }
            }
            BlockKind::Blockquote { text } => {
                let quote = TextStyle::new(
                    FontFace::HelveticaOblique,
                    BODY_SIZE_PT,
                    SLATE_600,
                    BODY_LINE_MM,
                );
                buf.draw_wrapped(&format!("\"{text}\""), LIST_INDENT_MM, quote);
            }
            BlockKind::Rule => buf.draw_rule(),
            BlockKind::Paragraph { spans } => {
                buf.draw_wrapped(&plain_text(spans), 0.0, BODY);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
