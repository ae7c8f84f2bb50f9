use crate::editing::CaretPosition;
use crate::models::CodeBlock;

/// A plain paragraph. `\n` in the text is a soft line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the paragraph text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Soft lines of the paragraph (at least one)
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines().nth(line).map_or(0, |text| text.chars().count())
    }

    /// Byte offset of a caret (clamped)
    pub(crate) fn byte_offset(&self, at: CaretPosition) -> usize {
        let mut offset = 0;
        for (index, line) in self.lines().enumerate() {
            if index == at.line {
                return offset
                    + line
                        .char_indices()
                        .nth(at.column)
                        .map_or(line.len(), |(i, _)| i);
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }

    /// Text from the paragraph start up to a caret
    pub(crate) fn text_before(&self, at: CaretPosition) -> &str {
        &self.text[..self.byte_offset(at)]
    }

    pub(crate) fn insert_text(&mut self, at: CaretPosition, text: &str) -> CaretPosition {
        let offset = self.byte_offset(at);
        self.text.insert_str(offset, text);
        match text.rsplit_once('\n') {
            Some((_, last)) => CaretPosition::new(
                at.line + text.matches('\n').count(),
                last.chars().count(),
            ),
            None => CaretPosition::new(at.line, at.column + text.chars().count()),
        }
    }

    /// Split at a caret; `self` keeps the text before it
    pub(crate) fn split_off(&mut self, at: CaretPosition) -> Paragraph {
        let offset = self.byte_offset(at);
        Paragraph::new(self.text.split_off(offset))
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// A top-level document node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph(Paragraph),
    CodeBlock(CodeBlock),
}

impl Node {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph(Paragraph::new(text))
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Node::Paragraph(paragraph) => Some(paragraph),
            Node::CodeBlock(_) => None,
        }
    }

    pub fn as_code_block(&self) -> Option<&CodeBlock> {
        match self {
            Node::CodeBlock(block) => Some(block),
            Node::Paragraph(_) => None,
        }
    }

    pub(crate) fn as_code_block_mut(&mut self) -> Option<&mut CodeBlock> {
        match self {
            Node::CodeBlock(block) => Some(block),
            Node::Paragraph(_) => None,
        }
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self, Node::CodeBlock(_))
    }

    pub fn line_count(&self) -> usize {
        match self {
            Node::Paragraph(paragraph) => paragraph.line_count(),
            Node::CodeBlock(block) => block.line_count(),
        }
    }

    /// Display length of a line in characters
    pub fn line_len(&self, line: usize) -> usize {
        match self {
            Node::Paragraph(paragraph) => paragraph.line_len(line),
            Node::CodeBlock(block) => block.line(line).map_or(0, |l| l.display_len()),
        }
    }

    /// Column of the first non-whitespace character on a line
    pub fn first_text_column(&self, line: usize) -> usize {
        match self {
            Node::Paragraph(paragraph) => paragraph.lines().nth(line).map_or(0, |text| {
                text.chars().take_while(|c| *c == ' ' || *c == '\t').count()
            }),
            Node::CodeBlock(block) => block.line(line).map_or(0, |l| l.first_text_column()),
        }
    }

    /// Display text of every line
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Node::Paragraph(paragraph) => paragraph.lines().map(str::to_string).collect(),
            Node::CodeBlock(block) => block.display_lines(),
        }
    }

    pub fn end(&self) -> CaretPosition {
        let last = self.line_count() - 1;
        CaretPosition::new(last, self.line_len(last))
    }

    pub fn clamp(&self, caret: CaretPosition) -> CaretPosition {
        let line = caret.line.min(self.line_count() - 1);
        CaretPosition::new(line, caret.column.min(self.line_len(line)))
    }

    /// Split at a caret; `self` keeps everything before it
    pub(crate) fn split_off(&mut self, at: CaretPosition) -> Node {
        match self {
            Node::Paragraph(paragraph) => Node::Paragraph(paragraph.split_off(at)),
            Node::CodeBlock(block) => Node::CodeBlock(block.split_off(at)),
        }
    }

    /// Append `other` to this node.
    ///
    /// A paragraph followed by a code block absorbs only the block's first
    /// line; any further lines are handed back as a code block of their own.
    pub(crate) fn join(&mut self, other: Node) -> Option<Node> {
        match (self, other) {
            (Node::Paragraph(paragraph), Node::Paragraph(other)) => {
                paragraph.push_str(other.text());
                None
            }
            (Node::Paragraph(paragraph), Node::CodeBlock(block)) => {
                let mut lines = block.display_lines().into_iter();
                if let Some(first) = lines.next() {
                    paragraph.push_str(&first);
                }
                let rest: Vec<String> = lines.collect();
                (!rest.is_empty())
                    .then(|| Node::CodeBlock(CodeBlock::from_display_lines(block.language(), rest)))
            }
            (Node::CodeBlock(block), Node::Paragraph(other)) => {
                let incoming = CodeBlock::from_display_lines(block.language(), other.lines());
                block.join(incoming);
                None
            }
            (Node::CodeBlock(block), Node::CodeBlock(other)) => {
                block.join(other);
                None
            }
        }
    }
}
