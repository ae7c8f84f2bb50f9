pub mod html;

pub use html::{render_block, render_snapshot};
