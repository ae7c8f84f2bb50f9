//! Lexer for SQL.
//!
//! Keywords are matched case-insensitively. Word operators (`and`, `like`,
//! `between`) share a class with symbol operators so `a and b` and `a && b`
//! highlight alike.

use logos::{Lexer, Logos};

use super::{Lexeme, block_comment_end};
use crate::token_class::TokenClass;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SqlToken {
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    #[regex(r"[A-Za-z_][A-Za-z0-9_$]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[token("'", |lex| quoted(lex, '\''))]
    #[token("\"", |lex| quoted(lex, '"'))]
    Str,

    /// MySQL-style quoted identifier
    #[token("`", |lex| quoted(lex, '`'))]
    QuotedIdent,

    #[regex(r"@@?[A-Za-z0-9_$.]*")]
    Variable,

    #[regex(r"--[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("/*", block_comment_end)]
    BlockComment,

    #[regex(r"[-+*/%=<>!|&^~:]")]
    Operator,

    #[regex(r"[(){}\[\];,.]")]
    Punctuation,
}

/// Logos callback for an opening quote: consume up to the closing quote,
/// where a doubled quote (`'it''s'`) is an escape. Unterminated literals run
/// to end of line.
fn quoted(lex: &mut Lexer<'_, SqlToken>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    let mut len = rest.len();
    while let Some((i, c)) = chars.next() {
        if c != quote {
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == quote) {
            chars.next();
            continue;
        }
        len = i + c.len_utf8();
        break;
    }
    lex.bump(len);
    true
}

const KEYWORDS: &[&str] = &[
    "add", "alter", "as", "asc", "begin", "bigint", "boolean", "by", "cascade", "case", "char",
    "check", "column", "commit", "constraint", "create", "cross", "database", "date", "default",
    "delete", "desc", "distinct", "drop", "else", "end", "except", "fetch", "foreign", "from",
    "full", "grant", "group", "having", "if", "index", "inner", "insert", "int", "integer",
    "intersect", "into", "join", "key", "left", "limit", "natural", "offset", "on", "order",
    "outer", "over", "partition", "primary", "references", "replace", "returning", "revoke",
    "right", "rollback", "schema", "select", "set", "table", "text", "then", "timestamp", "top",
    "transaction", "union", "unique", "update", "using", "values", "varchar", "view", "when",
    "where", "window", "with",
];

const WORD_OPERATORS: &[&str] = &[
    "all", "and", "any", "between", "exists", "ilike", "in", "is", "like", "not", "or", "some",
];

const CONSTANTS: &[&str] = &["true", "false", "null"];

fn contains_ignore_case(table: &[&str], word: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(word))
}

/// Lex and classify one line of SQL.
pub(crate) fn lex(text: &str) -> Vec<Lexeme> {
    let raw: Vec<_> = SqlToken::lexer(text).spanned().collect();

    raw.iter()
        .enumerate()
        .map(|(index, (result, span))| {
            let class = match result {
                Ok(SqlToken::Word) => {
                    let word = &text[span.clone()];
                    if contains_ignore_case(KEYWORDS, word) {
                        TokenClass::Attr
                    } else if contains_ignore_case(WORD_OPERATORS, word) {
                        TokenClass::Operator
                    } else if contains_ignore_case(CONSTANTS, word) {
                        TokenClass::Property
                    } else if next_is_call(&raw, text, index) {
                        TokenClass::Function
                    } else {
                        TokenClass::Plain
                    }
                }
                Ok(SqlToken::Number) => TokenClass::Property,
                Ok(SqlToken::Str) => TokenClass::Selector,
                Ok(SqlToken::Variable) => TokenClass::Variable,
                Ok(SqlToken::LineComment | SqlToken::BlockComment) => TokenClass::Comment,
                Ok(SqlToken::Operator) => TokenClass::Operator,
                Ok(SqlToken::Punctuation) => TokenClass::Punctuation,
                Ok(SqlToken::Whitespace | SqlToken::QuotedIdent) | Err(_) => TokenClass::Plain,
            };
            Lexeme {
                class,
                span: span.clone(),
            }
        })
        .collect()
}

fn next_is_call(
    raw: &[(Result<SqlToken, ()>, std::ops::Range<usize>)],
    text: &str,
    index: usize,
) -> bool {
    raw[index + 1..]
        .iter()
        .find(|(result, _)| *result != Ok(SqlToken::Whitespace))
        .is_some_and(|(result, span)| {
            *result == Ok(SqlToken::Punctuation) && &text[span.clone()] == "("
        })
}

#[cfg(test)]
mod tests {
    use crate::lexer::{Token, tokenize};
    use crate::token_class::TokenClass::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classes<'a>(tokens: &[Token<'a>]) -> Vec<(crate::TokenClass, &'a str)> {
        tokens.iter().map(|t| (t.class, t.text)).collect()
    }

    #[test]
    fn select_star_from() {
        let tokens = tokenize("select * from users", "sql");
        assert_eq!(
            classes(&tokens),
            vec![
                (Attr, "select"),
                (Plain, " "),
                (Operator, "*"),
                (Plain, " "),
                (Attr, "from"),
                (Plain, " users"),
            ]
        );
    }

    #[test]
    fn keywords_ignore_case() {
        let tokens = tokenize("Select X FrOm t", "sql");
        assert_eq!(
            classes(&tokens),
            vec![
                (Attr, "Select"),
                (Plain, " X "),
                (Attr, "FrOm"),
                (Plain, " t"),
            ]
        );
    }

    #[test]
    fn word_operators_and_constants() {
        let tokens = tokenize("a is not null and b", "sql");
        assert_eq!(
            classes(&tokens),
            vec![
                (Plain, "a "),
                (Operator, "is"),
                (Plain, " "),
                (Operator, "not"),
                (Plain, " "),
                (Property, "null"),
                (Plain, " "),
                (Operator, "and"),
                (Plain, " b"),
            ]
        );
    }

    #[rstest]
    #[case("'it''s'", vec![(Selector, "'it''s'")])]
    #[case("'open", vec![(Selector, "'open")])]
    #[case("\"name\"", vec![(Selector, "\"name\"")])]
    #[case("`my col`", vec![(Plain, "`my col`")])]
    #[case("@user_id", vec![(Variable, "@user_id")])]
    #[case("-- note", vec![(Comment, "-- note")])]
    #[case("# note", vec![(Comment, "# note")])]
    #[case("/* a */", vec![(Comment, "/* a */")])]
    #[case("3.14", vec![(Property, "3.14")])]
    #[case("a <> b", vec![(Plain, "a "), (Operator, "<>"), (Plain, " b")])]
    fn literal_classes(#[case] input: &str, #[case] expected: Vec<(crate::TokenClass, &str)>) {
        assert_eq!(classes(&tokenize(input, "sql")), expected);
    }

    #[test]
    fn function_call_before_paren() {
        let tokens = tokenize("max (id)", "sql");
        assert_eq!(tokens[0], Token::new(Function, "max"));
    }
}
