//! Highlighting categories assigned to token spans.
//!
//! The set matches the handful of colours a code block theme distinguishes.
//! Language lexers fold their richer token kinds into these classes.

use serde::Serialize;

/// Highlighting category of a token span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TokenClass {
    /// Keywords and at-rules (`if`, `select`, `from`)
    Attr,
    /// Line and block comments
    Comment,
    /// Function names at call/definition sites and class names
    Function,
    /// Namespace qualifiers
    Namespace,
    /// Symbol and word operators (`*`, `===`, `and`)
    Operator,
    /// Numbers, booleans and null-like constants
    Property,
    /// Brackets, separators and terminators
    Punctuation,
    /// String and character literals
    Selector,
    /// Variables and regex-like literals (`@name`)
    Variable,
    /// Identifiers, whitespace and anything unrecognised
    Plain,
}

impl TokenClass {
    /// CSS class name used by renderers, `None` for plain text.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenClass::Attr => Some("token-attr"),
            TokenClass::Comment => Some("token-comment"),
            TokenClass::Function => Some("token-function"),
            TokenClass::Namespace => Some("token-namespace"),
            TokenClass::Operator => Some("token-operator"),
            TokenClass::Property => Some("token-property"),
            TokenClass::Punctuation => Some("token-punctuation"),
            TokenClass::Selector => Some("token-selector"),
            TokenClass::Variable => Some("token-variable"),
            TokenClass::Plain => None,
        }
    }

    /// Plain spans carry no highlighting.
    pub fn is_plain(self) -> bool {
        self == TokenClass::Plain
    }

    /// Whether two adjacent tokens of this class collapse into one span.
    ///
    /// Identifier/whitespace runs and operator runs (`=>`, `&&`) merge;
    /// punctuation never does, so `()` stays two spans.
    pub(crate) fn merges_with_neighbour(self) -> bool {
        matches!(self, TokenClass::Plain | TokenClass::Operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_css_class() {
        assert_eq!(TokenClass::Plain.css_class(), None);
        assert!(TokenClass::Plain.is_plain());
    }

    #[test]
    fn highlighted_classes_have_distinct_css_classes() {
        let classes = [
            TokenClass::Attr,
            TokenClass::Comment,
            TokenClass::Function,
            TokenClass::Namespace,
            TokenClass::Operator,
            TokenClass::Property,
            TokenClass::Punctuation,
            TokenClass::Selector,
            TokenClass::Variable,
        ];
        let mut names: Vec<_> = classes.iter().filter_map(|c| c.css_class()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), classes.len());
    }

    #[test]
    fn punctuation_never_merges() {
        assert!(!TokenClass::Punctuation.merges_with_neighbour());
        assert!(TokenClass::Operator.merges_with_neighbour());
    }
}
