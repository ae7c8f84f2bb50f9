//! # codefence-syntax
//!
//! Lossless, per-line syntax tokenization for code blocks using [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## What the Tokenizer Does
//!
//! A code block highlights one line at a time. [`tokenize`] takes the raw
//! text of a single line plus a language id and returns a sequence of
//! [`Token`]s, each a slice of the input tagged with a [`TokenClass`]:
//!
//! ```text
//! "alert(1);" → [Function("alert"), Punctuation("("), Property("1"),
//!                Punctuation(")"), Punctuation(";")]
//! ```
//!
//! The tokenizer is deterministic and pure. It does not know about
//! indentation (that belongs to the code line, not its text), about fences,
//! or about neighbouring lines: a `/*` comment that is not closed on the
//! same line runs to the end of that line and no further.
//!
//! ## Architecture Overview
//!
//! ```text
//! Line Text → Logos enum → Raw tokens → Classification → Merge → Tokens
//!             (per family)              (dialect tables)
//! ```
//!
//! 1. **Lexing.** Each language family owns a Logos token enum
//!    ([`lexer::clike`] covers JavaScript, TypeScript, C, C++, Java and Rust;
//!    [`lexer::sql`] covers SQL). Unrecognised characters are kept as error
//!    tokens rather than dropped.
//! 2. **Classification.** Identifiers are looked up in the dialect's keyword
//!    and constant tables, and checked for a following `(` (function call)
//!    or a preceding class-introducing keyword.
//! 3. **Merging.** Adjacent plain and operator spans collapse so a renderer
//!    emits one span per colour change.
//!
//! ## Module Structure
//!
//! ```text
//! codefence-syntax/
//! ├── lib.rs           # This file - public API
//! ├── token_class.rs   # TokenClass enum and CSS class names
//! ├── language.rs      # Language registry, aliases, lexer dispatch
//! └── lexer.rs         # Token type, tokenize(), span merging
//!     ├── clike.rs     # C-family Logos enum and dialect tables
//!     └── sql.rs       # SQL Logos enum and keyword tables
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use codefence_syntax::{TokenClass, tokenize};
//!
//! let tokens = tokenize("select * from users", "sql");
//! assert_eq!(tokens[0].class, TokenClass::Attr);
//! assert_eq!(tokens[0].text, "select");
//!
//! // Unknown languages highlight as a single plain token
//! let tokens = tokenize("select * from users", "cobol");
//! assert_eq!(tokens.len(), 1);
//! assert!(tokens[0].class.is_plain());
//! ```

pub mod language;
pub mod lexer;
pub mod token_class;

pub use language::Language;
pub use lexer::{Token, detokenize, tokenize, tokenize_with_spans};
pub use token_class::TokenClass;
