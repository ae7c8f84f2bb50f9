//! # Lexer - Tokenizing Code Lines
//!
//! This module breaks one line of code into highlighted tokens using the
//! [Logos] lexer generator. Each language family has its own Logos enum
//! ([`clike`], [`sql`]); a small classification pass then folds the raw
//! lexer output into [`TokenClass`]es using per-language keyword tables.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Characters a lexer
//! does not recognise become [`TokenClass::Plain`] instead of being dropped,
//! so concatenating token texts always gives back the original line:
//!
//! ```
//! use codefence_syntax::{detokenize, tokenize};
//!
//! let line = "if (x) { alert(\"hi\"); }";
//! assert_eq!(detokenize(&tokenize(line, "javascript")), line);
//! ```
//!
//! ## Span Merging
//!
//! Highlighting only cares about colour changes, so adjacent plain tokens
//! (identifiers and the whitespace between them) collapse into one span, as
//! do runs of operator characters. Punctuation is never merged.

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::language::Language;
use crate::token_class::TokenClass;

pub(crate) mod clike;
pub(crate) mod sql;

/// A highlighted token: a slice of the source line and its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub class: TokenClass,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(class: TokenClass, text: &'a str) -> Self {
        Self { class, text }
    }
}

/// Classified byte range produced by a language lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub class: TokenClass,
    pub span: Range<usize>,
}

/// Tokenize a line of text in the language named by `language_id`.
///
/// Unknown language ids fall back to plain text: the whole line becomes a
/// single [`TokenClass::Plain`] token. An empty line yields no tokens.
pub fn tokenize<'a>(text: &'a str, language_id: &str) -> Vec<Token<'a>> {
    resolve_or_plain(language_id).tokenize(text)
}

/// Tokenize and return each token with its byte span in `text`.
pub fn tokenize_with_spans<'a>(
    text: &'a str,
    language_id: &str,
) -> Vec<(Token<'a>, Range<usize>)> {
    resolve_or_plain(language_id)
        .lex(text)
        .into_iter()
        .map(|lexeme| {
            let token = Token::new(lexeme.class, &text[lexeme.span.clone()]);
            (token, lexeme.span)
        })
        .collect()
}

/// Concatenate token texts back into the source line.
pub fn detokenize(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}

fn resolve_or_plain(language_id: &str) -> Language {
    Language::resolve(language_id).unwrap_or(Language::PlainText)
}

pub(crate) fn to_tokens(text: &str, lexemes: Vec<Lexeme>) -> Vec<Token<'_>> {
    lexemes
        .into_iter()
        .map(|lexeme| Token::new(lexeme.class, &text[lexeme.span]))
        .collect()
}

/// Plain text is a single token spanning the whole line.
pub(crate) fn plain(text: &str) -> Vec<Lexeme> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Lexeme {
        class: TokenClass::Plain,
        span: 0..text.len(),
    }]
}

/// Collapse adjacent lexemes whose class merges with its neighbour.
pub(crate) fn merge(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut merged: Vec<Lexeme> = Vec::with_capacity(lexemes.len());
    for lexeme in lexemes {
        if lexeme.span.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last)
                if last.class == lexeme.class
                    && lexeme.class.merges_with_neighbour()
                    && last.span.end == lexeme.span.start =>
            {
                last.span.end = lexeme.span.end;
            }
            _ => merged.push(lexeme),
        }
    }
    merged
}

/// Logos callback for `/*`: consume up to and including the closing `*/`,
/// or to the end of the line when the comment is unterminated.
pub(crate) fn block_comment_end<'s, T>(lex: &mut Lexer<'s, T>) -> bool
where
    T: Logos<'s, Source = str>,
{
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(class: TokenClass, text: &str) -> Token<'_> {
        Token { class, text }
    }

    #[test]
    fn tokenize_empty_line() {
        assert_eq!(tokenize("", "javascript"), vec![]);
        assert_eq!(tokenize("", "plain"), vec![]);
    }

    #[test]
    fn unknown_language_is_one_plain_token() {
        assert_eq!(
            tokenize("alert(1);", "cobol"),
            vec![token(TokenClass::Plain, "alert(1);")]
        );
    }

    #[test]
    fn merge_joins_plain_runs_only() {
        let merged = merge(vec![
            Lexeme {
                class: TokenClass::Plain,
                span: 0..3,
            },
            Lexeme {
                class: TokenClass::Plain,
                span: 3..4,
            },
            Lexeme {
                class: TokenClass::Punctuation,
                span: 4..5,
            },
            Lexeme {
                class: TokenClass::Punctuation,
                span: 5..6,
            },
        ]);
        assert_eq!(
            merged,
            vec![
                Lexeme {
                    class: TokenClass::Plain,
                    span: 0..4,
                },
                Lexeme {
                    class: TokenClass::Punctuation,
                    span: 4..5,
                },
                Lexeme {
                    class: TokenClass::Punctuation,
                    span: 5..6,
                },
            ]
        );
    }

    #[test]
    fn spans_are_correct() {
        let input = "let x = foo(1, \"two\");";
        for (token, span) in tokenize_with_spans(input, "js") {
            assert_eq!(token.text, &input[span]);
        }
    }

    #[test]
    fn all_bytes_preserved_for_every_language() {
        let inputs = [
            "alert(1);",
            "select * from users where id = 'x'",
            "\t  weird   spacing\t",
            "/* open comment",
            "\"unterminated string",
            "naïve → unicode 🦀",
            "a /* b */ c // d",
            "fn main() -> Result<(), Box<dyn Error>> {",
            "#include <stdio.h>",
            "@var := `quoted` -- trailing",
        ];
        for lang in Language::ALL {
            for input in inputs {
                let tokens = lang.tokenize(input);
                assert_eq!(
                    detokenize(&tokens),
                    input,
                    "Roundtrip failed for {lang:?}: {input:?}"
                );
                assert!(tokens.iter().all(|t| !t.text.is_empty()));
            }
        }
    }
}
