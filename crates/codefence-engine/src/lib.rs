pub mod editing;
pub mod io;
pub mod models;
pub mod render;
pub mod settings;

// Re-export key types for easier usage
pub use editing::{commands::*, document::*, patch::*, selection::*, snapshot::*};
pub use io::*;
pub use models::{CodeBlock, CodeLine, Node, Paragraph, VerticalDirection};
pub use settings::{EditorSettings, LineJoin};
