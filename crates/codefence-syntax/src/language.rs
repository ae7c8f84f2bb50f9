//! Language registry: canonical ids, aliases and lexer dispatch.

use std::fmt;

use crate::lexer::{self, Token, clike, sql};

/// Languages the tokenizer knows how to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    C,
    Cpp,
    Java,
    Rust,
    Sql,
    PlainText,
}

impl Language {
    /// Every supported language, in the order a language picker lists them.
    pub const ALL: [Language; 8] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Rust,
        Language::Sql,
        Language::PlainText,
    ];

    /// Canonical id stored on code blocks.
    pub fn id(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Rust => "rust",
            Language::Sql => "sql",
            Language::PlainText => "plain",
        }
    }

    /// Human readable name for pickers and status lines.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Rust => "Rust",
            Language::Sql => "SQL",
            Language::PlainText => "Plain Text",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::C => &["h"],
            Language::Cpp => &["c++", "cc", "cxx", "hpp"],
            Language::Java => &[],
            Language::Rust => &["rs"],
            Language::Sql => &["mysql", "postgresql", "sqlite"],
            Language::PlainText => &["text", "plaintext", "txt"],
        }
    }

    /// Look up a language by id or alias, ignoring case and surrounding
    /// whitespace.
    ///
    /// ```
    /// use codefence_syntax::Language;
    ///
    /// assert_eq!(Language::resolve("JS"), Some(Language::JavaScript));
    /// assert_eq!(Language::resolve("cobol"), None);
    /// ```
    pub fn resolve(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.id() == id || lang.aliases().contains(&id.as_str()))
    }

    /// Canonical id for a known language, otherwise the trimmed lowercase
    /// input. Unknown ids survive so a block keeps the language it was
    /// created with even though it highlights as plain text.
    pub fn normalize_id(id: &str) -> String {
        match Self::resolve(id) {
            Some(lang) => lang.id().to_string(),
            None => id.trim().to_ascii_lowercase(),
        }
    }

    /// The language after `self` in [`Language::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Tokenize one line of this language.
    pub fn tokenize(self, text: &str) -> Vec<Token<'_>> {
        lexer::to_tokens(text, self.lex(text))
    }

    pub(crate) fn lex(self, text: &str) -> Vec<lexer::Lexeme> {
        let lexemes = match self {
            Language::JavaScript => clike::lex(text, &clike::JAVASCRIPT),
            Language::TypeScript => clike::lex(text, &clike::TYPESCRIPT),
            Language::C => clike::lex(text, &clike::C),
            Language::Cpp => clike::lex(text, &clike::CPP),
            Language::Java => clike::lex(text, &clike::JAVA),
            Language::Rust => clike::lex(text, &clike::RUST),
            Language::Sql => sql::lex(text),
            Language::PlainText => lexer::plain(text),
        };
        lexer::merge(lexemes)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
