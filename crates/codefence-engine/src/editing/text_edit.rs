//! Typing, newlines and deletion, including the fence shortcut that turns a
//! paragraph into a code block and the backspace that turns it back.

use crate::editing::{DocPoint, Document, Selection, fence, structure, tracker};
use crate::models::{CodeBlock, Node};

pub(crate) fn insert_text(doc: &mut Document, text: &str) -> Vec<usize> {
    let mut changed = delete_selection(doc);
    if text.is_empty() {
        return changed;
    }
    let point = doc.selection.focus;
    if let Some(node) = complete_fence(doc, point, text) {
        changed.push(node);
        return changed;
    }

    let caret = match &mut doc.nodes[point.node] {
        Node::Paragraph(paragraph) => paragraph.insert_text(point.caret, text),
        Node::CodeBlock(block) => block.insert_text(point.caret, text),
    };
    doc.selection = Selection::collapsed(DocPoint::at(point.node, caret));
    changed.push(point.node);
    changed
}

/// Convert the paragraph to a code block when `text` completes an opening
/// fence at its start. The marker is dropped and the text after the caret
/// becomes the block's content.
fn complete_fence(doc: &mut Document, point: DocPoint, text: &str) -> Option<usize> {
    if !doc.settings.rich_text || text != " " {
        return None;
    }
    let Node::Paragraph(paragraph) = &doc.nodes[point.node] else {
        return None;
    };
    let typed = format!("{}{text}", paragraph.text_before(point.caret));
    let language = match fence::opening_fence(&typed)? {
        "" => doc.settings.default_language.clone(),
        language => language.to_string(),
    };
    let rest = paragraph.text()[paragraph.byte_offset(point.caret)..].to_string();

    let block = CodeBlock::from_display_lines(&language, rest.split('\n'));
    log::debug!(
        "Fence {:?} opened a {} code block at node {}",
        typed.trim_end(),
        block.language(),
        point.node
    );
    doc.nodes[point.node] = Node::CodeBlock(block);
    doc.selection = Selection::collapsed(DocPoint::new(point.node, 0, 0));
    Some(point.node)
}

pub(crate) fn insert_newline(doc: &mut Document) -> Vec<usize> {
    let mut changed = delete_selection(doc);
    let point = doc.selection.focus;

    let new_paragraph = match &mut doc.nodes[point.node] {
        Node::CodeBlock(block) => {
            let caret = block.split_line(point.caret);
            doc.selection = Selection::collapsed(DocPoint::at(point.node, caret));
            None
        }
        Node::Paragraph(paragraph) => Some(paragraph.split_off(point.caret)),
    };
    changed.push(point.node);

    if let Some(paragraph) = new_paragraph {
        doc.nodes.insert(point.node + 1, Node::Paragraph(paragraph));
        doc.selection = Selection::collapsed(DocPoint::new(point.node + 1, 0, 0));
        changed.push(point.node + 1);
    }
    changed
}

pub(crate) fn delete_backward(doc: &mut Document) -> Vec<usize> {
    if !doc.selection.is_collapsed() {
        return delete_selection(doc);
    }
    let point = doc.selection.focus;

    if let Node::CodeBlock(block) = &doc.nodes[point.node] {
        let caret = point.caret;
        if caret.line == 0 && caret.column == 0 {
            return revert_code_block(doc, point.node);
        }
        let indent = block.line(caret.line).map_or(0, |line| line.indent());
        if caret.column > 0 && caret.column <= indent {
            return structure::outdent_lines(doc, point.node, caret.line..=caret.line);
        }
    }

    match tracker::char_before(&doc.nodes[point.node], point.caret) {
        Some(before) => delete_between(doc, DocPoint::at(point.node, before), point),
        None if point.node > 0 => {
            let previous = point.node - 1;
            let end = doc.nodes[previous].end();
            delete_between(doc, DocPoint::at(previous, end), point)
        }
        None => Vec::new(),
    }
}

pub(crate) fn delete_forward(doc: &mut Document) -> Vec<usize> {
    if !doc.selection.is_collapsed() {
        return delete_selection(doc);
    }
    let point = doc.selection.focus;

    match tracker::char_after(&doc.nodes[point.node], point.caret) {
        Some(after) => delete_between(doc, point, DocPoint::at(point.node, after)),
        None if point.node + 1 < doc.nodes.len() => {
            delete_between(doc, point, DocPoint::new(point.node + 1, 0, 0))
        }
        None => Vec::new(),
    }
}

/// Replace a code block with one paragraph holding its lines joined by the
/// configured line-join convention
fn revert_code_block(doc: &mut Document, index: usize) -> Vec<usize> {
    let Node::CodeBlock(block) = &doc.nodes[index] else {
        return Vec::new();
    };
    let text = block
        .display_lines()
        .join(doc.settings.line_join.separator());
    log::debug!(
        "Reverted {}-line {} code block at node {index} to a paragraph",
        block.line_count(),
        block.language()
    );
    doc.nodes[index] = Node::paragraph(text);
    doc.selection = Selection::collapsed(DocPoint::new(index, 0, 0));
    vec![index]
}

fn delete_selection(doc: &mut Document) -> Vec<usize> {
    if doc.selection.is_collapsed() {
        return Vec::new();
    }
    let (start, end) = (doc.selection.start(), doc.selection.end());
    delete_between(doc, start, end)
}

/// Delete from `start` to `end` (`start <= end`). Nodes strictly between
/// them are removed and what follows `end` merges into the start node.
pub(crate) fn delete_between(doc: &mut Document, start: DocPoint, end: DocPoint) -> Vec<usize> {
    let tail = doc.nodes[end.node].split_off(end.caret);
    doc.nodes[start.node].split_off(start.caret);
    doc.nodes.drain(start.node + 1..=end.node);

    let mut changed = vec![start.node];
    if let Some(rest) = doc.nodes[start.node].join(tail) {
        doc.nodes.insert(start.node + 1, rest);
        changed.push(start.node + 1);
    }
    doc.selection = Selection::collapsed(start);
    changed
}
