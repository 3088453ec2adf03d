//! HTML presenter for the interactive view.

use std::fmt::Write;

use crate::markdown::blocks::{BlockKind, Document};
use crate::markdown::spans::Span;

/// Renders a document to an HTML fragment wrapped in `<div class="markdown-content">`.
pub fn render_html(doc: &Document) -> String {
    let mut out = String::from("<div class=\"markdown-content\">");

    for block in &doc.blocks {
        match &block.kind {
            BlockKind::Heading { level, spans } => {
                let n = u8::from(*level);
                let _ = write!(out, "<h{n}>{}</h{n}>", render_spans(spans));
            }
            BlockKind::List { items } => {
                out.push_str("<ul>");
                for item in items {
                    if item.nested {
                        out.push_str("<li class=\"nested\">");
                    } else {
                        out.push_str("<li>");
                    }
                    out.push_str(&render_spans(&item.spans));
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            BlockKind::Code { lines } => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape(&lines.join("\n")));
            }
            BlockKind::Table { headers, rows } => {
                out.push_str("<table><thead><tr>");
                for h in headers {
                    let _ = write!(out, "<th>{}</th>", escape(h));
                }
                out.push_str("</tr></thead><tbody>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        let _ = write!(out, "<td>{}</td>", escape(cell));
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</tbody></table>");
            }
            BlockKind::Blockquote { text } => {
                let _ = write!(out, "<blockquote>{}</blockquote>", escape(text));
            }
            BlockKind::Rule => out.push_str("<hr/>"),
            BlockKind::Paragraph { spans } => {
                let _ = write!(out, "<p>{}</p>", render_spans(spans));
            }
        }
    }

    out.push_str("</div>");
    out
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|s| {
            if s.bold {
                format!("<strong>{}</strong>", escape(&s.text))
            } else {
                escape(&s.text)
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::interpret;

    #[test]
    fn test_renders_bold_inside_paragraph() {
        let html = render_html(&interpret("**Ownership** and curiosity"));
        assert_eq!(
            html,
            "<div class=\"markdown-content\"><p><strong>Ownership</strong> and curiosity</p></div>"
        );
    }

    #[test]
    fn test_escapes_markup_in_text_and_code() {
        let html = render_html(&interpret("<script>\n```\na < b && c\n```"));
        assert!(html.contains("<p>&lt;script&gt;</p>"));
        assert!(html.contains("<pre><code>a &lt; b &amp;&amp; c</code></pre>"));
    }

    #[test]
    fn test_renders_table_and_nested_list() {
        let html = render_html(&interpret("- a\n  - b\n\n| H |\n|---|\n| v |"));
        assert!(html.contains("<ul><li>a</li><li class=\"nested\">b</li></ul>"));
        assert!(html.contains("<thead><tr><th>H</th></tr></thead><tbody><tr><td>v</td></tr></tbody>"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            render_html(&Document::default()),
            "<div class=\"markdown-content\"></div>"
        );
    }
}
