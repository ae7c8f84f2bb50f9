use serde::Serialize;

use crate::editing::tracker::{RenderAddress, RenderLayout, RenderSpan};
use crate::editing::{CaretPosition, DocPoint, Document, Selection};
use crate::models::Node;

/// Immutable view of a document for front ends.
///
/// Front ends render from snapshots and send [`Cmd`](crate::editing::Cmd)s
/// back; they never touch the nodes directly.
///
/// ```rust
/// # use codefence_engine::editing::{Document, RenderBlock};
/// # use codefence_engine::settings::EditorSettings;
/// let doc = Document::from_paragraphs(["hello"], EditorSettings::default());
/// let snapshot = doc.snapshot();
/// match &snapshot.blocks[0] {
///     RenderBlock::Paragraph { text, .. } => assert_eq!(text, "hello"),
///     RenderBlock::CodeBlock { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Document version for change detection
    pub version: u64,
    pub blocks: Vec<RenderBlock>,
    pub selection: Selection,
}

/// One node prepared for rendering.
///
/// `anchor` and `focus` are set on the blocks that hold the selection ends.
/// Code blocks address them as render addresses into `spans`; paragraphs
/// keep logical carets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    Paragraph {
        text: String,
        anchor: Option<CaretPosition>,
        focus: Option<CaretPosition>,
    },
    CodeBlock {
        language: String,
        gutter: String,
        spans: Vec<RenderSpan>,
        anchor: Option<RenderAddress>,
        focus: Option<RenderAddress>,
    },
}

impl Document {
    /// Build a render snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        let blocks = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.render_block(index, node))
            .collect();
        Snapshot {
            version: self.version,
            blocks,
            selection: self.selection,
        }
    }

    fn render_block(&self, index: usize, node: &Node) -> RenderBlock {
        let caret_in_node =
            |point: DocPoint| (point.node == index).then_some(point.caret);
        let anchor = caret_in_node(self.selection.anchor);
        let focus = caret_in_node(self.selection.focus);

        match node {
            Node::Paragraph(paragraph) => RenderBlock::Paragraph {
                text: paragraph.text().to_string(),
                anchor,
                focus,
            },
            Node::CodeBlock(block) => {
                let layout = RenderLayout::new(block);
                RenderBlock::CodeBlock {
                    language: block.language().to_string(),
                    gutter: block.gutter(),
                    anchor: anchor.map(|caret| layout.to_render_address(caret)),
                    focus: focus.map(|caret| layout.to_render_address(caret)),
                    spans: layout.spans().to_vec(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Cmd;
    use crate::editing::tracker::SpanKind;
    use crate::settings::EditorSettings;
    use codefence_syntax::TokenClass;

    #[test]
    fn test_snapshot_marks_selection_blocks_only() {
        let mut doc = Document::from_paragraphs(["one", "two"], EditorSettings::default());
        doc.apply(Cmd::MoveToDocumentEnd { extend: false });

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.blocks.len(), 2);
        assert!(matches!(
            &snapshot.blocks[0],
            RenderBlock::Paragraph { focus: None, anchor: None, .. }
        ));
        assert!(matches!(
            &snapshot.blocks[1],
            RenderBlock::Paragraph { focus: Some(CaretPosition { line: 0, column: 3 }), .. }
        ));
    }

    #[test]
    fn test_code_block_snapshot_carries_spans_and_gutter() {
        let mut doc = Document::default();
        doc.apply(Cmd::insert_text("```"));
        doc.apply(Cmd::insert_text(" "));
        doc.apply(Cmd::insert_text("x"));
        doc.apply(Cmd::InsertNewline);
        doc.apply(Cmd::insert_text("y"));

        let snapshot = doc.snapshot();
        let RenderBlock::CodeBlock {
            language,
            gutter,
            spans,
            focus,
            ..
        } = &snapshot.blocks[0]
        else {
            panic!("expected a code block, got {:?}", snapshot.blocks[0]);
        };
        assert_eq!(language, "javascript");
        assert_eq!(gutter, "12");
        let kinds: Vec<_> = spans.iter().map(|span| span.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpanKind::Token(TokenClass::Plain),
                SpanKind::LineBreak,
                SpanKind::Token(TokenClass::Plain),
            ]
        );
        assert_eq!(*focus, Some(RenderAddress::new(2, 1)));
        assert_eq!(snapshot.version, doc.version());
    }
}
