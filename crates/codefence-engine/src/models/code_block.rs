use std::ops::RangeInclusive;

use codefence_syntax::Language;

use crate::editing::CaretPosition;
use crate::models::CodeLine;

/// Direction for line moves and vertical caret movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// An ordered, non-empty sequence of code lines sharing one language.
///
/// Every line is tokenized with the block's language id. Unknown ids are
/// kept as given (lowercased) and highlight as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    language: String,
    lines: Vec<CodeLine>,
}

impl CodeBlock {
    /// Create a block with a single empty line
    pub fn new(language: &str) -> Self {
        let language = Language::normalize_id(language);
        let lines = vec![CodeLine::new("", 0, &language)];
        Self { language, lines }
    }

    /// Create a block from display lines; leading tabs become indentation.
    /// An empty iterator still yields one empty line.
    pub fn from_display_lines<I, S>(language: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let language = Language::normalize_id(language);
        let mut lines: Vec<CodeLine> = lines
            .into_iter()
            .map(|line| CodeLine::from_display(line.as_ref(), &language))
            .collect();
        if lines.is_empty() {
            lines.push(CodeLine::new("", 0, &language));
        }
        Self { language, lines }
    }

    /// Get the language id
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get the lines (never empty)
    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&CodeLine> {
        self.lines.get(index)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sequential line numbers for the gutter: `"1"`, `"12"`, `"123"`, ...
    pub fn gutter(&self) -> String {
        (1..=self.lines.len()).map(|n| n.to_string()).collect()
    }

    /// Display text of every line, in order
    pub fn display_lines(&self) -> Vec<String> {
        self.lines.iter().map(CodeLine::display_text).collect()
    }

    /// Caret after the last character of the last line
    pub fn end(&self) -> CaretPosition {
        let last = self.lines.len() - 1;
        CaretPosition::new(last, self.lines[last].display_len())
    }

    /// Clamp a caret into the block
    pub fn clamp(&self, caret: CaretPosition) -> CaretPosition {
        let line = caret.line.min(self.lines.len() - 1);
        CaretPosition::new(line, caret.column.min(self.lines[line].display_len()))
    }

    /// Switch language; raw text and indentation are untouched
    pub(crate) fn set_language(&mut self, language: &str) -> bool {
        let language = Language::normalize_id(language);
        if language == self.language {
            return false;
        }
        self.language = language;
        for line in &mut self.lines {
            line.retokenize(&self.language);
        }
        true
    }

    /// Insert text at a caret and return the caret after it.
    ///
    /// A caret inside the indentation inserts at the start of the raw text.
    /// Newlines in `text` start new lines whose leading tabs become
    /// indentation.
    pub(crate) fn insert_text(&mut self, at: CaretPosition, text: &str) -> CaretPosition {
        let at = self.clamp(at);
        let column = at.column.max(self.lines[at.line].indent());
        let tail = self.split_off(CaretPosition::new(at.line, column));
        let inserted = CodeBlock::from_display_lines(&self.language, text.split('\n'));
        let caret = if inserted.lines.len() == 1 {
            CaretPosition::new(at.line, column + inserted.lines[0].display_len())
        } else {
            inserted.end().offset_lines(at.line)
        };
        self.join(inserted);
        self.join(tail);
        caret
    }

    /// Split the line at a caret. The new line inherits the indentation
    /// level and the leading spaces before the caret; the returned caret sits
    /// right after them.
    pub(crate) fn split_line(&mut self, at: CaretPosition) -> CaretPosition {
        let at = self.clamp(at);
        let line = &self.lines[at.line];
        let indent = line.indent();
        let column = at.column.max(indent);
        let spaces = line
            .raw_text()
            .chars()
            .take(column - indent)
            .take_while(|c| *c == ' ')
            .count();

        let mut tail = self.split_off(CaretPosition::new(at.line, column));
        let first = &mut tail.lines[0];
        first.set_indent(indent);
        if spaces > 0 {
            let raw = format!("{}{}", " ".repeat(spaces), first.raw_text());
            first.set_raw_text(raw, &self.language);
        }
        self.lines.append(&mut tail.lines);
        CaretPosition::new(at.line + 1, indent + spaces)
    }

    /// Delete between two carets (`start <= end`)
    pub(crate) fn delete_range(&mut self, start: CaretPosition, end: CaretPosition) {
        let tail = self.split_off(end);
        self.split_off(start);
        self.join(tail);
    }

    /// Split at a caret; `self` keeps everything before it and the returned
    /// block (same language) holds the rest.
    pub(crate) fn split_off(&mut self, at: CaretPosition) -> CodeBlock {
        let at = self.clamp(at);
        let mut rest = self.lines.split_off(at.line + 1);
        let first = self.lines[at.line].split_off(at.column, &self.language);
        rest.insert(0, first);
        CodeBlock {
            language: self.language.clone(),
            lines: rest,
        }
    }

    /// Append another block: its first line joins this block's last line,
    /// the remaining lines follow, re-tokenized for this block's language.
    pub(crate) fn join(&mut self, other: CodeBlock) {
        let mut incoming = other.lines.into_iter();
        if let Some(first) = incoming.next()
            && let Some(last) = self.lines.last_mut()
        {
            last.append(first, &self.language);
        }
        for mut line in incoming {
            if other.language != self.language {
                line.retokenize(&self.language);
            }
            self.lines.push(line);
        }
    }

    pub(crate) fn indent_lines(&mut self, range: RangeInclusive<usize>) -> Vec<usize> {
        let range = self.clamp_range(range);
        for line in &mut self.lines[range.clone()] {
            line.set_indent(line.indent() + 1);
        }
        range.collect()
    }

    /// Decrease indentation, flooring at zero. Returns the lines that changed.
    pub(crate) fn outdent_lines(&mut self, range: RangeInclusive<usize>) -> Vec<usize> {
        let range = self.clamp_range(range);
        range
            .filter(|&index| {
                let line = &mut self.lines[index];
                let indented = line.indent() > 0;
                if indented {
                    line.set_indent(line.indent() - 1);
                }
                indented
            })
            .collect()
    }

    /// Move a run of lines past its neighbour. Returns false at the block
    /// boundary, leaving the block untouched.
    pub(crate) fn move_lines(
        &mut self,
        range: RangeInclusive<usize>,
        direction: VerticalDirection,
    ) -> bool {
        let range = self.clamp_range(range);
        let (start, end) = (*range.start(), *range.end());
        match direction {
            VerticalDirection::Up => {
                if start == 0 {
                    return false;
                }
                let neighbour = self.lines.remove(start - 1);
                self.lines.insert(end, neighbour);
            }
            VerticalDirection::Down => {
                if end + 1 >= self.lines.len() {
                    return false;
                }
                let neighbour = self.lines.remove(end + 1);
                self.lines.insert(start, neighbour);
            }
        }
        true
    }

    fn clamp_range(&self, range: RangeInclusive<usize>) -> RangeInclusive<usize> {
        let last = self.lines.len() - 1;
        let end = (*range.end()).min(last);
        (*range.start()).min(end)..=end
    }
}
