pub mod code_block;
pub mod code_line;
pub mod node;

pub use code_block::{CodeBlock, VerticalDirection};
pub use code_line::CodeLine;
pub use node::{Node, Paragraph};
