use std::ops::Range;

use codefence_syntax::{Token, TokenClass, tokenize_with_spans};

/// Token class plus byte range into the owning line's raw text
#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedToken {
    class: TokenClass,
    range: Range<usize>,
}

/// One line of a code block.
///
/// The line keeps its indentation level separately from its text. The
/// display text is one tab per level followed by the raw text, and caret
/// columns count characters of that display text. Tokens are cached and
/// refreshed whenever the raw text or the block language changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    raw_text: String,
    indent: usize,
    tokens: Vec<CachedToken>,
}

impl CodeLine {
    /// Create a line and tokenize it for `language`
    pub fn new(raw_text: impl Into<String>, indent: usize, language: &str) -> Self {
        let mut line = Self {
            raw_text: raw_text.into(),
            indent,
            tokens: Vec::new(),
        };
        line.retokenize(language);
        line
    }

    /// Create a line from display text, turning leading tabs into indentation
    pub fn from_display(text: &str, language: &str) -> Self {
        let tabs = text.len() - text.trim_start_matches('\t').len();
        Self::new(&text[tabs..], tabs, language)
    }

    /// Get the raw text (without indentation)
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Get the indentation level
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Cached tokens of the raw text
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.tokens
            .iter()
            .map(|t| Token::new(t.class, &self.raw_text[t.range.clone()]))
    }

    pub fn display_text(&self) -> String {
        let mut text = "\t".repeat(self.indent);
        text.push_str(&self.raw_text);
        text
    }

    /// Length of the display text in characters
    pub fn display_len(&self) -> usize {
        self.indent + self.raw_text.chars().count()
    }

    /// Column of the first character that is neither a tab nor a space
    pub fn first_text_column(&self) -> usize {
        let leading = self
            .raw_text
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        self.indent + leading
    }

    pub(crate) fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    pub(crate) fn set_raw_text(&mut self, raw_text: String, language: &str) {
        self.raw_text = raw_text;
        self.retokenize(language);
    }

    pub(crate) fn retokenize(&mut self, language: &str) {
        self.tokens = tokenize_with_spans(&self.raw_text, language)
            .into_iter()
            .map(|(token, range)| CachedToken {
                class: token.class,
                range,
            })
            .collect();
    }

    /// Byte offset into the raw text for a display column. Columns inside
    /// the indentation map to the start of the raw text.
    pub(crate) fn raw_offset(&self, column: usize) -> usize {
        let raw_column = column.saturating_sub(self.indent);
        self.raw_text
            .char_indices()
            .nth(raw_column)
            .map_or(self.raw_text.len(), |(offset, _)| offset)
    }

    /// Split at a display column; `self` keeps the text before it.
    ///
    /// Tabs of the indentation that lie after the column move to the
    /// returned line as its indentation.
    pub(crate) fn split_off(&mut self, column: usize, language: &str) -> CodeLine {
        let offset = self.raw_offset(column);
        let tail_indent = self.indent.saturating_sub(column);
        let tail_raw = self.raw_text[offset..].to_string();
        let head_raw = self.raw_text[..offset].to_string();
        self.indent = self.indent.min(column);
        self.set_raw_text(head_raw, language);
        CodeLine::new(tail_raw, tail_indent, language)
    }

    /// Append another line's display text to this one.
    ///
    /// When this line has no raw text the indentation levels add up;
    /// otherwise the other line's tabs become raw text.
    pub(crate) fn append(&mut self, other: CodeLine, language: &str) {
        if self.raw_text.is_empty() {
            self.indent += other.indent;
            self.set_raw_text(other.raw_text, language);
        } else {
            let mut raw = std::mem::take(&mut self.raw_text);
            raw.push_str(&"\t".repeat(other.indent));
            raw.push_str(&other.raw_text);
            self.set_raw_text(raw, language);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefence_syntax::detokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_text_prefixes_one_tab_per_level() {
        let line = CodeLine::new("foo();", 2, "javascript");
        assert_eq!(line.display_text(), "\t\tfoo();");
        assert_eq!(line.display_len(), 8);
    }

    #[test]
    fn tokens_cover_raw_text_only() {
        let line = CodeLine::new("alert(1);", 1, "javascript");
        let tokens: Vec<_> = line.tokens().collect();
        assert_eq!(detokenize(&tokens), "alert(1);");
        assert_eq!(tokens[0].class, TokenClass::Function);
    }

    #[test]
    fn from_display_reads_leading_tabs() {
        let line = CodeLine::from_display("\t\tx\ty", "plain");
        assert_eq!(line.indent(), 2);
        assert_eq!(line.raw_text(), "x\ty");
    }

    #[test]
    fn first_text_column_skips_indent_and_spaces() {
        let line = CodeLine::new(" a b ", 1, "javascript");
        assert_eq!(line.first_text_column(), 2);
    }

    #[test]
    fn raw_offset_handles_multibyte_text() {
        let line = CodeLine::new("né x", 1, "plain");
        assert_eq!(line.raw_offset(0), 0);
        assert_eq!(line.raw_offset(1), 0);
        assert_eq!(line.raw_offset(3), 3);
        assert_eq!(line.raw_offset(99), line.raw_text().len());
    }

    #[test]
    fn split_inside_indentation_moves_remaining_tabs() {
        let mut line = CodeLine::new("foo", 3, "plain");
        let tail = line.split_off(1, "plain");
        assert_eq!((line.indent(), line.raw_text()), (1, ""));
        assert_eq!((tail.indent(), tail.raw_text()), (2, "foo"));
    }

    #[test]
    fn split_then_append_restores_display_text() {
        let mut line = CodeLine::new("let x = 1;", 1, "javascript");
        let tail = line.split_off(5, "javascript");
        assert_eq!(line.display_text(), "\tlet ");
        line.append(tail, "javascript");
        assert_eq!(line.display_text(), "\tlet x = 1;");
    }

    #[test]
    fn append_keeps_foreign_tabs_as_text() {
        let mut line = CodeLine::new("a", 0, "plain");
        line.append(CodeLine::new("b", 2, "plain"), "plain");
        assert_eq!((line.indent(), line.raw_text()), (0, "a\t\tb"));
    }
}
