//! Static font-metric tables for the PDF base-14 faces used by the exporter.
//!
//! Widths are in em units (advance width / 1000 from the Adobe AFM files), so a
//! string's printed width is `measure_str * font_size`. The base faces are never
//! embedded, which means the viewer uses exactly these metrics and wrapping
//! computed here matches what is drawn.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The four standard faces the exporter draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Helvetica,
        FontFace::HelveticaBold,
        FontFace::HelveticaOblique,
        FontFace::Courier,
    ];

    /// PostScript base font name as written into the PDF font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::HelveticaOblique => "Helvetica-Oblique",
            FontFace::Courier => "Courier",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
            FontFace::HelveticaOblique => "F3",
            FontFace::Courier => "F4",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page geometry for the export, in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// Where the cursor lands after a page break.
    pub top_mm: f32,
}

impl PageConfig {
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Lowest y any drawn baseline may reach.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }
}

/// A4 portrait, 20 mm margins all sides.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 20.0,
        top_mm: 20.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    /// Width of the bullet glyph (WinAnsi 0x95).
    pub bullet_width: f32,
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '•' {
            self.bullet_width
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of `s` in millimetres at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }

    /// Greedy word-wrap of `text` to lines no wider than `max_width_mm`.
    ///
    /// Explicit newlines always break. Runs of spaces are preserved. A single
    /// word wider than the line is broken between characters. Empty input
    /// yields one empty line.
    pub fn wrap_text(&self, text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
        let scale = size_pt * MM_PER_PT;
        let space_w = self.char_width(' ') * scale;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_w = 0.0_f32;
            let mut started = false;

            for word in paragraph.split(' ') {
                let word_w = self.width_mm(word, size_pt);

                if started && current_w + space_w + word_w > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0.0;
                    started = false;
                }

                if !started && word_w > max_width_mm {
                    let mut chunk = String::new();
                    let mut chunk_w = 0.0_f32;
                    for c in word.chars() {
                        let cw = self.char_width(c) * scale;
                        if !chunk.is_empty() && chunk_w + cw > max_width_mm {
                            lines.push(std::mem::take(&mut chunk));
                            chunk_w = 0.0;
                        }
                        chunk.push(c);
                        chunk_w += cw;
                    }
                    current = chunk;
                    current_w = chunk_w;
                    started = true;
                    continue;
                }

                if started {
                    current.push(' ');
                    current_w += space_w;
                }
                current.push_str(word);
                current_w += word_w;
                started = true;
            }

            lines.push(current);
        }

        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
    // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0     1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :     ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A     B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [     \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a     b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n     o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {     |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [f32; 95] = [
    // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0     1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :     ;      <      =      >      ?      @
    0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
    // A     B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
    // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [     \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
    // a     b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
    // n     o      p      q      r      s      t      u      v      w      x      y      z
    0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
    // {     |      }      ~
    0.389, 0.280, 0.389, 0.584,
];

/// Helvetica: body text.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    bullet_width: 0.350,
};

/// Helvetica-Bold: titles, headings, questions.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_BOLD_WIDTHS,
    average_char_width: 0.611,
    bullet_width: 0.350,
};

/// Helvetica-Oblique shares the upright advance widths.
static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    bullet_width: 0.350,
};

/// Courier: monospace, every glyph 600 units.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    average_char_width: 0.600,
    bullet_width: 0.600,
};

/// Returns the static metric table for a given face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
        FontFace::HelveticaOblique => &HELVETICA_OBLIQUE_TABLE,
        FontFace::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFace::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
        assert!((metrics.measure_str("•") - 0.350).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Product Manager";
        assert!(
            get_metrics(FontFace::HelveticaBold).measure_str(text)
                > get_metrics(FontFace::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_courier_is_monospace() {
        let metrics = get_metrics(FontFace::Courier);
        assert_eq!(metrics.measure_str("iiii"), metrics.measure_str("WWWW"));
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.wrap_text("Hello world", 170.0, 11.0), vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "We are looking for an engineer who enjoys owning systems end to end. "
            .repeat(6);
        let lines = metrics.wrap_text(text.trim(), 170.0, 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_mm(line, 11.0) <= 170.0 + 1e-3, "too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.trim());
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let metrics = get_metrics(FontFace::Courier);
        let word = "x".repeat(200);
        let lines = metrics.wrap_text(&word, 50.0, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(metrics.width_mm(line, 10.0) <= 50.0 + 1e-3);
        }
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines_and_space_runs() {
        let metrics = get_metrics(FontFace::Courier);
        let lines = metrics.wrap_text("a   b\nc", 170.0, 9.0);
        assert_eq!(lines, vec!["a   b", "c"]);
    }

    #[test]
    fn test_wrap_empty_is_single_empty_line() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.wrap_text("", 100.0, 11.0), vec![String::new()]);
    }

    #[test]
    fn test_all_faces_accessible_with_unique_resource_names() {
        let mut names: Vec<&str> = FontFace::ALL
            .iter()
            .map(|f| {
                let metrics = get_metrics(*f);
                let monospaced = metrics.char_width('i') == metrics.char_width('W');
                assert_eq!(monospaced, *f == FontFace::Courier);
                f.resource_name()
            })
            .collect();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        assert!((config.content_width_mm() - 170.0).abs() < 1e-4);
        assert!((config.bottom_limit_mm() - 277.0).abs() < 1e-4);
    }
}
