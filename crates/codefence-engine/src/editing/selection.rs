//! Logical positions: carets inside a node, points in the document, and
//! anchor/focus selections.

use serde::Serialize;

/// A caret inside one node, as (line, column).
///
/// For a code block `line` indexes its code lines and `column` counts
/// characters of the line's display text, where each indentation level is
/// one tab. For a paragraph `line` indexes its soft lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CaretPosition {
    pub line: usize,
    pub column: usize,
}

impl CaretPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Shift down by `lines` lines, keeping the column
    pub(crate) fn offset_lines(self, lines: usize) -> Self {
        Self::new(self.line + lines, self.column)
    }
}

/// A caret somewhere in the document. Ordered by node, then line, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocPoint {
    pub node: usize,
    pub caret: CaretPosition,
}

impl DocPoint {
    pub const fn new(node: usize, line: usize, column: usize) -> Self {
        Self {
            node,
            caret: CaretPosition::new(line, column),
        }
    }

    pub const fn at(node: usize, caret: CaretPosition) -> Self {
        Self { node, caret }
    }
}

/// Anchor stays put while extending; focus is where the caret is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub anchor: DocPoint,
    pub focus: DocPoint,
}

impl Selection {
    pub const fn new(anchor: DocPoint, focus: DocPoint) -> Self {
        Self { anchor, focus }
    }

    pub const fn collapsed(point: DocPoint) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The earlier of anchor and focus.
    pub fn start(&self) -> DocPoint {
        self.anchor.min(self.focus)
    }

    /// The later of anchor and focus.
    pub fn end(&self) -> DocPoint {
        self.anchor.max(self.focus)
    }

    /// Move the focus, keeping the anchor when `extend` is set.
    pub fn with_focus(self, focus: DocPoint, extend: bool) -> Self {
        if extend {
            Self::new(self.anchor, focus)
        } else {
            Self::collapsed(focus)
        }
    }

    /// Apply `f` to both ends.
    pub fn map(self, mut f: impl FnMut(DocPoint) -> DocPoint) -> Self {
        Self::new(f(self.anchor), f(self.focus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_order_by_node_then_line_then_column() {
        assert!(DocPoint::new(0, 5, 5) < DocPoint::new(1, 0, 0));
        assert!(DocPoint::new(1, 0, 9) < DocPoint::new(1, 1, 0));
        assert!(DocPoint::new(1, 1, 2) < DocPoint::new(1, 1, 3));
    }

    #[test]
    fn backwards_selection_reports_ordered_ends() {
        let selection = Selection::new(DocPoint::new(2, 0, 1), DocPoint::new(0, 3, 4));
        assert_eq!(selection.start(), DocPoint::new(0, 3, 4));
        assert_eq!(selection.end(), DocPoint::new(2, 0, 1));
        assert!(!selection.is_collapsed());
    }

    #[test]
    fn with_focus_extends_or_collapses() {
        let selection = Selection::collapsed(DocPoint::new(0, 0, 1));
        let target = DocPoint::new(0, 0, 4);
        assert_eq!(
            selection.with_focus(target, true),
            Selection::new(DocPoint::new(0, 0, 1), target)
        );
        assert_eq!(selection.with_focus(target, false), Selection::collapsed(target));
    }
}
