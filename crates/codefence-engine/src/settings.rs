use serde::Serialize;

/// How code lines are joined when a code block reverts to a paragraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LineJoin {
    /// Lines become soft line breaks inside one paragraph
    #[default]
    SoftBreak,
    /// Lines are joined with a single space
    Space,
}

impl LineJoin {
    pub fn separator(self) -> &'static str {
        match self {
            LineJoin::SoftBreak => "\n",
            LineJoin::Space => " ",
        }
    }
}

/// Editor behaviour switches carried by a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Rich-text mode enables fences and code blocks; plain-text mode
    /// inserts fence markers verbatim and ignores the code block toggle
    pub rich_text: bool,
    /// Language for fences without a language and for toggled blocks
    pub default_language: String,
    pub line_join: LineJoin,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rich_text: true,
            default_language: "javascript".to_string(),
            line_join: LineJoin::default(),
        }
    }
}

impl EditorSettings {
    pub fn plain_text() -> Self {
        Self {
            rich_text: false,
            ..Self::default()
        }
    }
}
