//! HTML rendering of document snapshots.
//!
//! Code blocks become a `<code>` element carrying the gutter and language as
//! data attributes, with one `<span>` per tab or token and `<br>` between
//! lines. Paragraphs become `<p>` with `<br>` soft breaks.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::editing::{RenderBlock, RenderSpan, Snapshot, SpanKind};

/// Render every block of a snapshot, one element per line of output
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut html = String::new();
    for block in &snapshot.blocks {
        html.push_str(&render_block(block));
        html.push('\n');
    }
    html
}

pub fn render_block(block: &RenderBlock) -> String {
    match block {
        RenderBlock::Paragraph { text, .. } => render_paragraph(text),
        RenderBlock::CodeBlock {
            language,
            gutter,
            spans,
            ..
        } => render_code_block(language, gutter, spans),
    }
}

fn render_paragraph(text: &str) -> String {
    if text.is_empty() {
        return "<p><br></p>".to_string();
    }
    let body: Vec<_> = text.split('\n').map(encode_text).collect();
    format!("<p>{}</p>", body.join("<br>"))
}

fn render_code_block(language: &str, gutter: &str, spans: &[RenderSpan]) -> String {
    let mut html = format!(
        r#"<code class="code" spellcheck="false" data-gutter="{}" data-highlight-language="{}">"#,
        encode_double_quoted_attribute(gutter),
        encode_double_quoted_attribute(language),
    );
    for span in spans {
        match span.kind {
            SpanKind::LineBreak => html.push_str("<br>"),
            SpanKind::Tab => html.push_str("<span class=\"code-tab\">\t</span>"),
            SpanKind::Token(class) => {
                let text = encode_text(&span.text);
                match class.css_class() {
                    Some(css) => html.push_str(&format!("<span class=\"{css}\">{text}</span>")),
                    None => html.push_str(&format!("<span>{text}</span>")),
                }
            }
        }
    }
    html.push_str("</code>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, Document};
    use crate::settings::EditorSettings;

    #[test]
    fn test_render_alert_block() {
        let mut doc = Document::default();
        doc.apply(Cmd::insert_text("```"));
        doc.apply(Cmd::insert_text(" "));
        doc.apply(Cmd::insert_text("alert(1);"));

        insta::assert_snapshot!(render_block(&doc.snapshot().blocks[0]), @r#"<code class="code" spellcheck="false" data-gutter="1" data-highlight-language="javascript"><span class="token-function">alert</span><span class="token-punctuation">(</span><span class="token-property">1</span><span class="token-punctuation">)</span><span class="token-punctuation">;</span></code>"#);
    }

    #[test]
    fn test_render_indented_lines_and_breaks() {
        let mut doc = Document::from_paragraphs(["x", "\ty"], EditorSettings::default());
        doc.apply(Cmd::SelectAll);
        doc.apply(Cmd::ToggleCodeBlock);

        let html = render_snapshot(&doc.snapshot());
        assert_eq!(
            html.trim_end(),
            "<code class=\"code\" spellcheck=\"false\" data-gutter=\"12\" data-highlight-language=\"javascript\">\
             <span>x</span><br><span class=\"code-tab\">\t</span><span>y</span></code>"
        );
    }

    #[test]
    fn test_paragraph_text_is_escaped() {
        let doc = Document::from_paragraphs(["a < b && c\nnext", ""], EditorSettings::default());
        let html = render_snapshot(&doc.snapshot());
        assert_eq!(html, "<p>a &lt; b &amp;&amp; c<br>next</p>\n<p><br></p>\n");
    }
}
