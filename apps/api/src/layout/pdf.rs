//! PDF serialization of composed pages using the base-14 Type1 faces.
//!
//! Fonts are referenced, not embedded, with WinAnsiEncoding; text is
//! transcoded to WinAnsi bytes and unmappable characters become `?`.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::compositor::{ComposedDocument, DrawOp, Rgb};
use crate::layout::font_metrics::{FontFace, MM_PER_PT};

const PRODUCER: &str = "RecruitAI";

/// Serializes the composed pages into a complete PDF file.
pub fn render_pdf(doc: &ComposedDocument) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_refs: Vec<(FontFace, Ref)> = FontFace::ALL.iter().map(|f| (*f, alloc())).collect();
    let page_ids: Vec<Ref> = doc.pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = doc.pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .producer(TextStr(PRODUCER));

    for (face, font_ref) in &font_refs {
        pdf.type1_font(*font_ref)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let width_pt = to_pt(doc.config.page_width_mm);
    let height_pt = to_pt(doc.config.page_height_mm);

    for (i, page) in doc.pages.iter().enumerate() {
        let mut content = Content::new();
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x_mm,
                    y_mm,
                    face,
                    size_pt,
                    color,
                    text,
                } => {
                    let (r, g, b) = unit_rgb(*color);
                    content.set_fill_rgb(r, g, b);
                    content
                        .begin_text()
                        .set_font(Name(face.resource_name().as_bytes()), *size_pt)
                        .next_line(to_pt(*x_mm), height_pt - to_pt(*y_mm))
                        .show(Str(&to_winansi(text)))
                        .end_text();
                }
                DrawOp::Rule {
                    x1_mm,
                    x2_mm,
                    y_mm,
                    color,
                } => {
                    let (r, g, b) = unit_rgb(*color);
                    let y = height_pt - to_pt(*y_mm);
                    content.save_state();
                    content.set_line_width(0.5);
                    content.set_stroke_rgb(r, g, b);
                    content.move_to(to_pt(*x1_mm), y);
                    content.line_to(to_pt(*x2_mm), y);
                    content.stroke();
                    content.restore_state();
                }
            }
        }
        pdf.stream(content_ids[i], &content.finish());

        let mut pdf_page = pdf.page(page_ids[i]);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
            .parent(pages_id)
            .contents(content_ids[i]);
        {
            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            for (face, font_ref) in &font_refs {
                fonts.pair(Name(face.resource_name().as_bytes()), *font_ref);
            }
        }
    }

    pdf.finish()
}

fn to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn unit_rgb(Rgb(r, g, b): Rgb) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Transcodes to Windows-1252. Latin-1 maps directly; the typographic
/// characters of the 0x80..0x9F block are mapped explicitly.
pub fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
