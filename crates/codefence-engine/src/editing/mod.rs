/*!
 * # Editing Core Module
 *
 * The editing core turns key presses into document edits for a block editor
 * whose code blocks are lists of syntax-highlighted lines.
 *
 * ## Architecture Overview
 *
 * ### 1. Explicit Document State
 * - A [`Document`] holds an ordered list of paragraphs and code blocks
 * - Code blocks store one [`CodeLine`](crate::models::CodeLine) per line:
 *   raw text, an indentation level and cached tokens
 * - There is no global editor; every front end owns its documents
 *
 * ### 2. Command Reducer
 * - All edits are [`Cmd`] values applied through [`Document::apply`]
 * - Each command runs to completion and yields a [`Patch`] with the changed
 *   nodes, the new selection and the document version
 * - Commands that cannot apply are no-ops, never errors
 *
 * ### 3. Logical Selection
 * - Carets are stored as [`DocPoint`]s: node index plus a (line, column)
 *   [`CaretPosition`]
 * - The [`tracker`] derives render addresses (span index plus offset) from
 *   the current token layout, so carets survive re-tokenization
 *
 * ### 4. Read API
 * - [`Document::snapshot`] produces a [`Snapshot`] of [`RenderBlock`]s that
 *   front ends render from
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` state and the `apply` entry point
 * - **`commands`**: `Cmd` enum and dispatch to the reducers
 * - **`text_edit`**: typing, newlines, deletion and the fence shortcut
 * - **`structure`**: code block toggle, language, indentation and line moves
 * - **`navigation`**: caret movement and selection commands
 * - **`tracker`**: render layout and caret boundary queries
 * - **`keymap`**: default key bindings
 * - **`snapshot`**: immutable view for rendering
 * - **`patch`**: result of one command
 *
 * ## Usage Pattern
 *
 * ```rust
 * use codefence_engine::editing::*;
 * use codefence_engine::editing::keymap::{Key, KeyInput, command_for};
 *
 * let mut doc = Document::default();
 * for c in "```sql alter".chars() {
 *     if let Some(cmd) = command_for(KeyInput::plain(Key::Char(c))) {
 *         doc.apply(cmd);
 *     }
 * }
 *
 * let snapshot = doc.snapshot();
 * match &snapshot.blocks[0] {
 *     RenderBlock::CodeBlock { language, gutter, .. } => {
 *         assert_eq!(language, "sql");
 *         assert_eq!(gutter, "1");
 *     }
 *     RenderBlock::Paragraph { .. } => unreachable!(),
 * }
 * ```
 */

pub mod commands;
pub mod document;
mod fence;
pub mod keymap;
mod navigation;
pub mod patch;
pub mod selection;
pub mod snapshot;
mod structure;
mod text_edit;
pub mod tracker;

pub use commands::{Cmd, Direction};
pub use document::Document;
pub use patch::Patch;
pub use selection::{CaretPosition, DocPoint, Selection};
pub use snapshot::{RenderBlock, Snapshot};
pub use tracker::{RenderAddress, RenderLayout, RenderSpan, SpanKind};
