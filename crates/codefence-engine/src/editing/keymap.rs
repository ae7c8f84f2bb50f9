//! Default key bindings. Front ends translate their native key events into
//! [`KeyInput`] and look the command up here.

use crate::editing::{Cmd, Direction};
use crate::models::VerticalDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    /// Cmd on macOS; treated like Ctrl
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Command bound to a key, if any
pub fn command_for(input: KeyInput) -> Option<Cmd> {
    let KeyInput { key, modifiers } = input;
    let extend = modifiers.shift;

    let cmd = match key {
        Key::Up | Key::Down if modifiers.alt => Cmd::MoveLine {
            direction: if key == Key::Up {
                VerticalDirection::Up
            } else {
                VerticalDirection::Down
            },
        },
        Key::Up | Key::Home if modifiers.command() => Cmd::MoveToDocumentStart { extend },
        Key::Down | Key::End if modifiers.command() => Cmd::MoveToDocumentEnd { extend },
        Key::Left if modifiers.command() => Cmd::MoveToLineStart { extend },
        Key::Right if modifiers.command() => Cmd::MoveToLineEnd { extend },
        Key::Home => Cmd::MoveToLineStart { extend },
        Key::End => Cmd::MoveToLineEnd { extend },
        Key::Left => Cmd::MoveCaret {
            direction: Direction::Left,
            extend,
        },
        Key::Right => Cmd::MoveCaret {
            direction: Direction::Right,
            extend,
        },
        Key::Up => Cmd::MoveCaret {
            direction: Direction::Up,
            extend,
        },
        Key::Down => Cmd::MoveCaret {
            direction: Direction::Down,
            extend,
        },
        Key::Tab if modifiers.shift => Cmd::Outdent,
        Key::Tab => Cmd::Indent,
        Key::Enter => Cmd::InsertNewline,
        Key::Backspace => Cmd::DeleteBackward,
        Key::Delete => Cmd::DeleteForward,
        Key::Char('a' | 'A') if modifiers.command() => Cmd::SelectAll,
        Key::Char(_) if modifiers.command() || modifiers.alt => return None,
        Key::Char(c) => Cmd::insert_text(c),
    };
    Some(cmd)
}
