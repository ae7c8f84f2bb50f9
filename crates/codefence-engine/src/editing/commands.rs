use crate::editing::{Document, Selection, navigation, structure, text_edit};
use crate::models::VerticalDirection;

/// Caret movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Every edit and caret movement the document understands.
///
/// Commands act on the document's current selection; none of them take a
/// position of their own except [`Cmd::SetSelection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Type text at the caret, replacing any selected text. Typing a space
    /// right after an opening fence turns the paragraph into a code block.
    InsertText {
        text: String,
    },
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    MoveCaret {
        direction: Direction,
        extend: bool,
    },
    MoveToLineStart {
        extend: bool,
    },
    MoveToLineEnd {
        extend: bool,
    },
    MoveToBlockStart {
        extend: bool,
    },
    MoveToBlockEnd {
        extend: bool,
    },
    MoveToDocumentStart {
        extend: bool,
    },
    MoveToDocumentEnd {
        extend: bool,
    },
    SelectAll,
    SetSelection {
        selection: Selection,
    },
    /// Merge the selected paragraphs into one code block, or split selected
    /// code blocks back into paragraphs
    ToggleCodeBlock,
    /// Change the language of every selected code block
    SetLanguage {
        language: String,
    },
    Indent,
    Outdent,
    /// Move the selected lines past their neighbour inside a code block
    MoveLine {
        direction: VerticalDirection,
    },
}

impl Cmd {
    pub fn insert_text(text: impl Into<String>) -> Self {
        Cmd::InsertText { text: text.into() }
    }

    pub fn move_caret(direction: Direction) -> Self {
        Cmd::MoveCaret {
            direction,
            extend: false,
        }
    }

    pub fn set_language(language: impl Into<String>) -> Self {
        Cmd::SetLanguage {
            language: language.into(),
        }
    }

    /// Vertical caret moves keep the goal column alive
    pub(crate) fn is_vertical_move(&self) -> bool {
        matches!(
            self,
            Cmd::MoveCaret {
                direction: Direction::Up | Direction::Down,
                ..
            }
        )
    }
}

/// Run a command against the document. Returns the indices of nodes whose
/// content changed; the selection is updated in place.
pub(crate) fn run_command(doc: &mut Document, cmd: &Cmd) -> Vec<usize> {
    match cmd {
        Cmd::InsertText { text } => text_edit::insert_text(doc, text),
        Cmd::InsertNewline => text_edit::insert_newline(doc),
        Cmd::DeleteBackward => text_edit::delete_backward(doc),
        Cmd::DeleteForward => text_edit::delete_forward(doc),
        Cmd::MoveCaret { direction, extend } => navigation::move_caret(doc, *direction, *extend),
        Cmd::MoveToLineStart { extend } => navigation::move_to_line_start(doc, *extend),
        Cmd::MoveToLineEnd { extend } => navigation::move_to_line_end(doc, *extend),
        Cmd::MoveToBlockStart { extend } => navigation::move_to_block_start(doc, *extend),
        Cmd::MoveToBlockEnd { extend } => navigation::move_to_block_end(doc, *extend),
        Cmd::MoveToDocumentStart { extend } => navigation::move_to_document_start(doc, *extend),
        Cmd::MoveToDocumentEnd { extend } => navigation::move_to_document_end(doc, *extend),
        Cmd::SelectAll => navigation::select_all(doc),
        Cmd::SetSelection { selection } => navigation::set_selection(doc, *selection),
        Cmd::ToggleCodeBlock => structure::toggle_code_block(doc),
        Cmd::SetLanguage { language } => structure::set_language(doc, language),
        Cmd::Indent => structure::indent(doc),
        Cmd::Outdent => structure::outdent(doc),
        Cmd::MoveLine { direction } => structure::move_line(doc, *direction),
    }
}
