//! Lexer for the C family: JavaScript, TypeScript, C, C++, Java and Rust.
//!
//! The languages share one Logos token enum; what differs between them is
//! the [`Dialect`] table used to classify identifiers.

use logos::{Lexer, Logos};

use super::{Lexeme, block_comment_end};
use crate::token_class::TokenClass;

/// How a single quote opens a literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum QuoteStyle {
    /// `'...'` is a string (JavaScript, TypeScript)
    #[default]
    Strings,
    /// `'x'` is a one-character literal; a lone `'` (Rust lifetimes) is plain
    CharLiterals,
}

/// Raw token kinds for C-like source.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = QuoteStyle)]
pub(crate) enum CLikeToken {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?[A-Za-z_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[A-Za-z_]*")]
    Number,

    /// String and template literals run to end of line when unterminated.
    #[regex(r#""([^"\\\n]|\\.)*"?"#)]
    #[regex(r"`([^`\\\n]|\\.)*`?")]
    Str,

    #[token("'", single_quoted)]
    Quoted,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment_end)]
    BlockComment,

    #[regex(r"[-+*/%=&|^!<>?~]")]
    Operator,

    #[regex(r"[(){}\[\];,.:]")]
    Punctuation,
}

/// Logos callback for `'`: consume the rest of the literal according to the
/// dialect's [`QuoteStyle`]. Returning `false` leaves the quote as a
/// one-character error token, which classifies as plain text.
fn single_quoted(lex: &mut Lexer<'_, CLikeToken>) -> bool {
    let rest = lex.remainder();
    let len = match lex.extras {
        QuoteStyle::Strings => quoted_len(rest, '\''),
        QuoteStyle::CharLiterals => match char_literal_len(rest) {
            Some(len) => len,
            None => return false,
        },
    };
    lex.bump(len);
    true
}

/// Bytes up to and including the closing `quote`, honouring backslash
/// escapes; the whole remainder when the literal is unterminated.
fn quoted_len(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    rest.len()
}

/// Bytes of a closed character literal body plus its closing quote.
fn char_literal_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    match chars.next()? {
        (_, '\'') => None,
        (_, '\\') => {
            let (i, escaped) = chars.next()?;
            let after = i + escaped.len_utf8();
            rest[after..].find('\'').map(|end| after + end + 1)
        }
        (i, c) => {
            let after = i + c.len_utf8();
            rest[after..].starts_with('\'').then_some(after + 1)
        }
    }
}

/// Identifier tables for one C-like language.
pub(crate) struct Dialect {
    quote_style: QuoteStyle,
    keywords: &'static [&'static str],
    constants: &'static [&'static str],
    /// Keywords after which the next identifier names a type.
    type_introducers: &'static [&'static str],
    /// Keywords after which the next identifier names a namespace.
    namespace_introducers: &'static [&'static str],
}

impl Dialect {
    fn introduced_class(&self, keyword: &str) -> Option<TokenClass> {
        if self.type_introducers.contains(&keyword) {
            Some(TokenClass::Function)
        } else if self.namespace_introducers.contains(&keyword) {
            Some(TokenClass::Namespace)
        } else {
            None
        }
    }
}

const JS_KEYWORDS: &[&str] = &[
    "as",
    "async",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "of",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

const JS_TYPE_INTRODUCERS: &[&str] = &[
    "class",
    "extends",
    "implements",
    "instanceof",
    "interface",
    "new",
];

pub(crate) const JAVASCRIPT: Dialect = Dialect {
    quote_style: QuoteStyle::Strings,
    keywords: JS_KEYWORDS,
    constants: &["true", "false", "NaN", "Infinity"],
    type_introducers: JS_TYPE_INTRODUCERS,
    namespace_introducers: &[],
};

pub(crate) const TYPESCRIPT: Dialect = Dialect {
    quote_style: QuoteStyle::Strings,
    keywords: &[
        "abstract",
        "any",
        "as",
        "async",
        "await",
        "boolean",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "declare",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "is",
        "keyof",
        "let",
        "module",
        "namespace",
        "never",
        "new",
        "null",
        "number",
        "object",
        "of",
        "private",
        "protected",
        "public",
        "readonly",
        "return",
        "static",
        "string",
        "super",
        "switch",
        "symbol",
        "this",
        "throw",
        "try",
        "type",
        "typeof",
        "undefined",
        "unknown",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ],
    constants: &["true", "false", "NaN", "Infinity"],
    type_introducers: &[
        "class",
        "extends",
        "implements",
        "instanceof",
        "interface",
        "new",
        "type",
    ],
    namespace_introducers: &["namespace", "module"],
};

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool",
];

pub(crate) const C: Dialect = Dialect {
    quote_style: QuoteStyle::CharLiterals,
    keywords: C_KEYWORDS,
    constants: &["NULL", "true", "false"],
    type_introducers: &["struct", "union", "enum"],
    namespace_introducers: &[],
};

pub(crate) const CPP: Dialect = Dialect {
    quote_style: QuoteStyle::CharLiterals,
    keywords: &[
        "auto",
        "bool",
        "break",
        "case",
        "catch",
        "char",
        "class",
        "const",
        "constexpr",
        "continue",
        "default",
        "delete",
        "do",
        "double",
        "else",
        "enum",
        "explicit",
        "extern",
        "float",
        "for",
        "friend",
        "goto",
        "if",
        "inline",
        "int",
        "long",
        "namespace",
        "new",
        "noexcept",
        "operator",
        "override",
        "private",
        "protected",
        "public",
        "return",
        "short",
        "signed",
        "sizeof",
        "static",
        "struct",
        "switch",
        "template",
        "this",
        "throw",
        "try",
        "typedef",
        "typename",
        "union",
        "unsigned",
        "using",
        "virtual",
        "void",
        "volatile",
        "while",
    ],
    constants: &["nullptr", "NULL", "true", "false"],
    type_introducers: &["class", "struct", "union", "enum", "new", "typename"],
    namespace_introducers: &["namespace"],
};

pub(crate) const JAVA: Dialect = Dialect {
    quote_style: QuoteStyle::CharLiterals,
    keywords: &[
        "abstract",
        "assert",
        "boolean",
        "break",
        "byte",
        "case",
        "catch",
        "char",
        "class",
        "const",
        "continue",
        "default",
        "do",
        "double",
        "else",
        "enum",
        "extends",
        "final",
        "finally",
        "float",
        "for",
        "goto",
        "if",
        "implements",
        "import",
        "instanceof",
        "int",
        "interface",
        "long",
        "native",
        "new",
        "package",
        "private",
        "protected",
        "public",
        "record",
        "return",
        "short",
        "static",
        "strictfp",
        "super",
        "switch",
        "synchronized",
        "this",
        "throw",
        "throws",
        "transient",
        "try",
        "var",
        "void",
        "volatile",
        "while",
        "yield",
    ],
    constants: &["true", "false", "null"],
    type_introducers: &[
        "class",
        "interface",
        "enum",
        "extends",
        "implements",
        "new",
        "record",
    ],
    namespace_introducers: &["package", "import"],
};

pub(crate) const RUST: Dialect = Dialect {
    quote_style: QuoteStyle::CharLiterals,
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "union", "unsafe", "use", "where", "while",
    ],
    constants: &["true", "false"],
    type_introducers: &["struct", "enum", "trait", "type", "union"],
    namespace_introducers: &["mod", "use"],
};

/// Lex and classify one line of C-like source.
pub(crate) fn lex(text: &str, dialect: &Dialect) -> Vec<Lexeme> {
    let raw: Vec<_> = CLikeToken::lexer_with_extras(text, dialect.quote_style)
        .spanned()
        .collect();
    let mut lexemes = Vec::with_capacity(raw.len());
    let mut introduced: Option<TokenClass> = None;

    for (index, (result, span)) in raw.iter().enumerate() {
        let slice = &text[span.clone()];
        let class = match result {
            Ok(CLikeToken::Ident) => {
                let class = if dialect.keywords.contains(&slice) {
                    TokenClass::Attr
                } else if dialect.constants.contains(&slice) {
                    TokenClass::Property
                } else if let Some(class) = introduced {
                    class
                } else if next_is_call(&raw, text, index) {
                    TokenClass::Function
                } else {
                    TokenClass::Plain
                };
                introduced = dialect.introduced_class(slice);
                class
            }
            Ok(CLikeToken::Whitespace) => TokenClass::Plain,
            other => {
                introduced = None;
                match other {
                    Ok(CLikeToken::Number) => TokenClass::Property,
                    Ok(CLikeToken::Str | CLikeToken::Quoted) => TokenClass::Selector,
                    Ok(CLikeToken::LineComment | CLikeToken::BlockComment) => TokenClass::Comment,
                    Ok(CLikeToken::Operator) => TokenClass::Operator,
                    Ok(CLikeToken::Punctuation) => TokenClass::Punctuation,
                    // Unrecognised characters stay in the output as plain text
                    _ => TokenClass::Plain,
                }
            }
        };
        lexemes.push(Lexeme {
            class,
            span: span.clone(),
        });
    }

    lexemes
}

/// True when the next non-whitespace token after `index` is `(`.
fn next_is_call(
    raw: &[(Result<CLikeToken, ()>, std::ops::Range<usize>)],
    text: &str,
    index: usize,
) -> bool {
    raw[index + 1..]
        .iter()
        .find(|(result, _)| *result != Ok(CLikeToken::Whitespace))
        .is_some_and(|(result, span)| {
            *result == Ok(CLikeToken::Punctuation) && &text[span.clone()] == "("
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
    fn alert_call() {
        let tokens = tokenize("alert(1);", "javascript");
        assert_eq!(
            classes(&tokens),
            vec![
                (Function, "alert"),
                (Punctuation, "("),
                (Property, "1"),
                (Punctuation, ")"),
                (Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn sql_words_are_plain_in_javascript() {
        let tokens = tokenize("select * from users", "javascript");
        assert_eq!(
            classes(&tokens),
            vec![(Plain, "select "), (Operator, "*"), (Plain, " from users")]
        );
    }

    #[test]
    fn if_statement_header() {
        let tokens = tokenize("if (x) {", "javascript");
        assert_eq!(
            classes(&tokens),
            vec![
                (Attr, "if"),
                (Plain, " "),
                (Punctuation, "("),
                (Plain, "x"),
                (Punctuation, ")"),
                (Plain, " "),
                (Punctuation, "{"),
            ]
        );
    }

    #[test]
    fn call_without_arguments() {
        let tokens = tokenize("x();", "javascript");
        assert_eq!(
            classes(&tokens),
            vec![
                (Function, "x"),
                (Punctuation, "("),
                (Punctuation, ")"),
                (Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn class_names_after_new() {
        let tokens = tokenize("new Map()", "js");
        assert_eq!(
            classes(&tokens),
            vec![
                (Attr, "new"),
                (Plain, " "),
                (Function, "Map"),
                (Punctuation, "("),
                (Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn operator_runs_merge() {
        let tokens = tokenize("a === b && c", "javascript");
        assert_eq!(
            classes(&tokens),
            vec![
                (Plain, "a "),
                (Operator, "==="),
                (Plain, " b "),
                (Operator, "&&"),
                (Plain, " c"),
            ]
        );
    }

    #[rstest]
    #[case("// note", vec![(Comment, "// note")])]
    #[case("/* a */ b", vec![(Comment, "/* a */"), (Plain, " b")])]
    #[case("/* open", vec![(Comment, "/* open")])]
    #[case("\"hi\"", vec![(Selector, "\"hi\"")])]
    #[case("'c'", vec![(Selector, "'c'")])]
    #[case("`tpl ${x}`", vec![(Selector, "`tpl ${x}`")])]
    #[case("0xFF", vec![(Property, "0xFF")])]
    #[case("true", vec![(Property, "true")])]
    fn literal_classes(#[case] input: &str, #[case] expected: Vec<(crate::TokenClass, &str)>) {
        assert_eq!(classes(&tokenize(input, "javascript")), expected);
    }

    #[test]
    fn rust_namespaces_and_types() {
        let tokens = tokenize("use std;", "rust");
        assert_eq!(
            classes(&tokens),
            vec![
                (Attr, "use"),
                (Plain, " "),
                (Namespace, "std"),
                (Punctuation, ";"),
            ]
        );

        let tokens = tokenize("struct Point", "rust");
        assert_eq!(
            classes(&tokens),
            vec![(Attr, "struct"), (Plain, " "), (Function, "Point")]
        );
    }

    #[test]
    fn rust_lifetime_stays_plain() {
        let input = "fn f<'a>(x: &'a str)";
        let tokens = tokenize(input, "rust");
        assert_eq!(crate::detokenize(&tokens), input);
        assert!(tokens.iter().all(|t| t.class != Selector));
    }

    #[rstest]
    #[case("'x'")]
    #[case("'\\n'")]
    #[case("'\\u{1F980}'")]
    #[case("'\\''")]
    fn rust_char_literals(#[case] input: &str) {
        assert_eq!(classes(&tokenize(input, "rust")), vec![(Selector, input)]);
    }

    #[test]
    fn c_keywords_differ_from_javascript() {
        let tokens = tokenize("int x", "c");
        assert_eq!(classes(&tokens), vec![(Attr, "int"), (Plain, " x")]);

        let tokens = tokenize("int x", "javascript");
        assert_eq!(classes(&tokens), vec![(Plain, "int x")]);
    }
}
