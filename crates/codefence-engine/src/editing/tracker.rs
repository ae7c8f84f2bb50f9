//! # Selection Tracking
//!
//! Carets are stored logically as [`CaretPosition`] (line, column). A
//! renderer, however, sees a code block as one flat list of spans:
//!
//! ```text
//! "\talert(1);" / "x"   →   [Tab, alert, (, 1, ), ;, LineBreak, x]
//!                            0    1      2  3  4  5  6          7
//! ```
//!
//! [`RenderLayout`] is built from the block's current tokens and maps
//! between the two. It is rebuilt after every edit, so a caret that keeps
//! its logical position resolves to the right span even when re-tokenizing
//! moved the token boundaries around it.
//!
//! ## Canonical Addresses
//!
//! Several span/offset pairs can describe the same visual position (the end
//! of one span is the start of the next). The layout always produces one
//! canonical address per caret:
//!
//! - column 0 is the first span of the line at offset 0
//! - any other column sticks to the end of the span it follows
//! - an empty line is addressed by its trailing line break (or one past
//!   the last span) at offset 0
//!
//! The boundary queries at the bottom of this module back the caret
//! movement commands; they work on any [`Node`].

use codefence_syntax::TokenClass;
use serde::Serialize;

use crate::editing::CaretPosition;
use crate::models::{CodeBlock, Node};

/// What a rendered span stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpanKind {
    /// One level of indentation
    Tab,
    Token(TokenClass),
    /// Separator between two lines; has no width
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSpan {
    pub kind: SpanKind,
    pub text: String,
    /// Line the span belongs to; a line break belongs to the line it ends
    pub line: usize,
    /// Display column where the span starts
    pub start_column: usize,
}

impl RenderSpan {
    /// Width in characters
    pub fn len(&self) -> usize {
        match self.kind {
            SpanKind::LineBreak => 0,
            SpanKind::Tab | SpanKind::Token(_) => self.text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index into a [`RenderLayout`]'s spans plus a character offset in that span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RenderAddress {
    pub span: usize,
    pub offset: usize,
}

impl RenderAddress {
    pub const fn new(span: usize, offset: usize) -> Self {
        Self { span, offset }
    }
}

/// Flattened span list of one code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLayout {
    spans: Vec<RenderSpan>,
    /// Index of each line's first span (or of its trailing break when empty)
    line_starts: Vec<usize>,
    line_lens: Vec<usize>,
}

impl RenderLayout {
    pub fn new(block: &CodeBlock) -> Self {
        let mut spans = Vec::new();
        let mut line_starts = Vec::with_capacity(block.line_count());
        let mut line_lens: Vec<usize> = Vec::with_capacity(block.line_count());

        for (index, line) in block.lines().iter().enumerate() {
            if let Some(previous) = index.checked_sub(1) {
                spans.push(RenderSpan {
                    kind: SpanKind::LineBreak,
                    text: String::new(),
                    line: previous,
                    start_column: line_lens[previous],
                });
            }
            line_starts.push(spans.len());

            for tab in 0..line.indent() {
                spans.push(RenderSpan {
                    kind: SpanKind::Tab,
                    text: "\t".to_string(),
                    line: index,
                    start_column: tab,
                });
            }
            let mut column = line.indent();
            for token in line.tokens() {
                let span = RenderSpan {
                    kind: SpanKind::Token(token.class),
                    text: token.text.to_string(),
                    line: index,
                    start_column: column,
                };
                column += span.len();
                spans.push(span);
            }
            line_lens.push(column);
        }

        Self {
            spans,
            line_starts,
            line_lens,
        }
    }

    pub fn spans(&self) -> &[RenderSpan] {
        &self.spans
    }

    /// Canonical address of a caret; out-of-range carets are clamped
    pub fn to_render_address(&self, caret: CaretPosition) -> RenderAddress {
        let line = caret.line.min(self.line_lens.len() - 1);
        let column = caret.column.min(self.line_lens[line]);
        let first = self.line_starts[line];
        let end = self.line_end(line);

        if first == end || column == 0 {
            return RenderAddress::new(first, 0);
        }
        for index in first..end {
            let span = &self.spans[index];
            if column <= span.start_column + span.len() {
                return RenderAddress::new(index, column - span.start_column);
            }
        }
        RenderAddress::new(end - 1, self.spans[end - 1].len())
    }

    /// Logical caret for an address; out-of-range addresses are clamped
    pub fn to_caret_position(&self, address: RenderAddress) -> CaretPosition {
        match self.spans.get(address.span) {
            Some(span) if span.kind == SpanKind::LineBreak => {
                CaretPosition::new(span.line, self.line_lens[span.line])
            }
            Some(span) => {
                CaretPosition::new(span.line, span.start_column + address.offset.min(span.len()))
            }
            None => {
                let last = self.line_lens.len() - 1;
                CaretPosition::new(last, self.line_lens[last])
            }
        }
    }

    /// One past the last span of a line
    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line + 1)
            .map_or(self.spans.len(), |next| next - 1)
    }
}

/// Smart home: the first non-whitespace column, or column 0 when the caret
/// is already there
pub fn line_start(node: &Node, caret: CaretPosition) -> CaretPosition {
    let caret = node.clamp(caret);
    let text_start = node.first_text_column(caret.line);
    let column = if caret.column == text_start {
        0
    } else {
        text_start
    };
    CaretPosition::new(caret.line, column)
}

pub fn line_end(node: &Node, caret: CaretPosition) -> CaretPosition {
    let caret = node.clamp(caret);
    CaretPosition::new(caret.line, node.line_len(caret.line))
}

pub fn block_start(_node: &Node) -> CaretPosition {
    CaretPosition::new(0, 0)
}

pub fn block_end(node: &Node) -> CaretPosition {
    node.end()
}

/// One character to the left, wrapping to the previous line.
/// `None` at the start of the node.
pub fn char_before(node: &Node, caret: CaretPosition) -> Option<CaretPosition> {
    let caret = node.clamp(caret);
    if caret.column > 0 {
        Some(CaretPosition::new(caret.line, caret.column - 1))
    } else {
        let line = caret.line.checked_sub(1)?;
        Some(CaretPosition::new(line, node.line_len(line)))
    }
}

/// One character to the right, wrapping to the next line.
/// `None` at the end of the node.
pub fn char_after(node: &Node, caret: CaretPosition) -> Option<CaretPosition> {
    let caret = node.clamp(caret);
    if caret.column < node.line_len(caret.line) {
        Some(CaretPosition::new(caret.line, caret.column + 1))
    } else if caret.line + 1 < node.line_count() {
        Some(CaretPosition::new(caret.line + 1, 0))
    } else {
        None
    }
}

/// Same goal column on the previous line, clamped to its length
pub fn line_above(node: &Node, caret: CaretPosition, goal: usize) -> Option<CaretPosition> {
    let line = node.clamp(caret).line.checked_sub(1)?;
    Some(CaretPosition::new(line, goal.min(node.line_len(line))))
}

/// Same goal column on the next line, clamped to its length
pub fn line_below(node: &Node, caret: CaretPosition, goal: usize) -> Option<CaretPosition> {
    let line = node.clamp(caret).line + 1;
    (line < node.line_count()).then(|| CaretPosition::new(line, goal.min(node.line_len(line))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn layout(lines: &[&str]) -> RenderLayout {
        RenderLayout::new(&CodeBlock::from_display_lines("javascript", lines))
    }

    fn code(lines: &[&str]) -> Node {
        Node::CodeBlock(CodeBlock::from_display_lines("javascript", lines))
    }

    #[test]
    fn spans_flatten_tabs_tokens_and_breaks() {
        let layout = layout(&["\talert(1);", "x"]);
        let kinds: Vec<_> = layout.spans().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpanKind::Tab,
                SpanKind::Token(TokenClass::Function),
                SpanKind::Token(TokenClass::Punctuation),
                SpanKind::Token(TokenClass::Property),
                SpanKind::Token(TokenClass::Punctuation),
                SpanKind::Token(TokenClass::Punctuation),
                SpanKind::LineBreak,
                SpanKind::Token(TokenClass::Plain),
            ]
        );
    }

    #[test]
    fn end_of_alert_line_is_last_span_offset_one() {
        let layout = layout(&["alert(1);"]);
        assert_eq!(
            layout.to_render_address(CaretPosition::new(0, 9)),
            RenderAddress::new(4, 1)
        );
    }

    #[test]
    fn line_ends_in_three_line_block() {
        let layout = layout(&["a();", "b();", "c();"]);
        assert_eq!(
            layout.to_render_address(CaretPosition::new(0, 4)),
            RenderAddress::new(3, 1)
        );
        assert_eq!(
            layout.to_render_address(CaretPosition::new(2, 4)),
            RenderAddress::new(13, 1)
        );
    }

    #[rstest]
    #[case(CaretPosition::new(0, 0), RenderAddress::new(0, 0))]
    #[case(CaretPosition::new(0, 2), RenderAddress::new(1, 1))]
    #[case(CaretPosition::new(0, 6), RenderAddress::new(1, 5))]
    #[case(CaretPosition::new(1, 6), RenderAddress::new(4, 5))]
    fn indented_lines_address_tab_then_text(
        #[case] caret: CaretPosition,
        #[case] expected: RenderAddress,
    ) {
        let layout = RenderLayout::new(&CodeBlock::from_display_lines(
            "javascript",
            ["\t a b ", "\t c d "],
        ));
        assert_eq!(layout.to_render_address(caret), expected);
    }

    #[test]
    fn empty_lines_address_the_following_break() {
        let layout = layout(&["", "x", ""]);
        assert_eq!(
            layout.to_render_address(CaretPosition::new(0, 0)),
            RenderAddress::new(0, 0)
        );
        assert_eq!(
            layout.to_render_address(CaretPosition::new(2, 0)),
            RenderAddress::new(3, 0)
        );
        assert_eq!(
            layout.to_caret_position(RenderAddress::new(3, 0)),
            CaretPosition::new(2, 0)
        );
    }

    #[test]
    fn mapping_round_trips_every_caret() {
        let block = CodeBlock::from_display_lines(
            "javascript",
            ["\tif (x) {", "", "\t\treturn 'y';", "}"],
        );
        let layout = RenderLayout::new(&block);
        for (line, code_line) in block.lines().iter().enumerate() {
            for column in 0..=code_line.display_len() {
                let caret = CaretPosition::new(line, column);
                let address = layout.to_render_address(caret);
                assert_eq!(layout.to_caret_position(address), caret, "{address:?}");
            }
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let layout = layout(&["ab", "cd"]);
        assert_eq!(
            layout.to_render_address(CaretPosition::new(7, 7)),
            layout.to_render_address(CaretPosition::new(1, 2))
        );
        assert_eq!(
            layout.to_caret_position(RenderAddress::new(99, 0)),
            CaretPosition::new(1, 2)
        );
        assert_eq!(
            layout.to_caret_position(RenderAddress::new(0, 99)),
            CaretPosition::new(0, 2)
        );
    }

    #[test]
    fn smart_home_toggles_between_text_start_and_column_zero() {
        let node = code(&["\t a b "]);
        let from_end = line_start(&node, CaretPosition::new(0, 6));
        assert_eq!(from_end, CaretPosition::new(0, 2));
        assert_eq!(line_start(&node, from_end), CaretPosition::new(0, 0));
        assert_eq!(line_start(&node, CaretPosition::new(0, 0)), from_end);
    }

    #[test]
    fn line_and_block_boundaries() {
        let node = code(&["ab", "\tcde"]);
        assert_eq!(line_end(&node, CaretPosition::new(1, 0)), CaretPosition::new(1, 4));
        assert_eq!(block_start(&node), CaretPosition::new(0, 0));
        assert_eq!(block_end(&node), CaretPosition::new(1, 4));
    }

    #[test]
    fn horizontal_steps_wrap_lines() {
        let node = code(&["ab", "c"]);
        assert_eq!(
            char_before(&node, CaretPosition::new(1, 0)),
            Some(CaretPosition::new(0, 2))
        );
        assert_eq!(
            char_after(&node, CaretPosition::new(0, 2)),
            Some(CaretPosition::new(1, 0))
        );
        assert_eq!(char_before(&node, CaretPosition::new(0, 0)), None);
        assert_eq!(char_after(&node, CaretPosition::new(1, 1)), None);
    }

    #[test]
    fn vertical_steps_use_goal_column() {
        let node = code(&["a();", "", "c();"]);
        let up = line_above(&node, CaretPosition::new(2, 4), 4);
        assert_eq!(up, Some(CaretPosition::new(1, 0)));
        assert_eq!(
            line_above(&node, CaretPosition::new(1, 0), 4),
            Some(CaretPosition::new(0, 4))
        );
        assert_eq!(line_below(&node, CaretPosition::new(2, 0), 4), None);
    }
}
