//! Structural commands: toggling code blocks, switching language,
//! indentation and line moves.

use std::ops::RangeInclusive;

use crate::editing::{DocPoint, Document};
use crate::models::{CodeBlock, Node, VerticalDirection};

pub(crate) fn toggle_code_block(doc: &mut Document) -> Vec<usize> {
    if !doc.settings.rich_text {
        log::trace!("Code block toggle ignored in plain-text mode");
        return Vec::new();
    }
    let range = doc.selection.start().node..=doc.selection.end().node;
    if doc.nodes[range.clone()].iter().all(Node::is_code_block) {
        unwrap_code_blocks(doc, range)
    } else {
        wrap_in_code_block(doc, range)
    }
}

/// Merge the nodes into one code block, one line per paragraph soft line.
/// Code blocks in the range keep their lines and lend their language.
fn wrap_in_code_block(doc: &mut Document, range: RangeInclusive<usize>) -> Vec<usize> {
    let first = *range.start();
    let language = doc.nodes[range.clone()]
        .iter()
        .find_map(Node::as_code_block)
        .map_or_else(
            || doc.settings.default_language.clone(),
            |block| block.language().to_string(),
        );

    let mut line_offsets = Vec::new();
    let mut lines = Vec::new();
    for node in &doc.nodes[range.clone()] {
        line_offsets.push(lines.len());
        lines.extend(node.display_lines());
    }
    let block = CodeBlock::from_display_lines(&language, lines);
    log::debug!(
        "Wrapped nodes {range:?} into a {}-line {} code block",
        block.line_count(),
        block.language()
    );
    doc.nodes.splice(range, [Node::CodeBlock(block)]);

    doc.selection = doc.selection.map(|point| {
        DocPoint::new(
            first,
            line_offsets[point.node - first] + point.caret.line,
            point.caret.column,
        )
    });
    vec![first]
}

/// Split every code block in the range into one paragraph per line
fn unwrap_code_blocks(doc: &mut Document, range: RangeInclusive<usize>) -> Vec<usize> {
    let first = *range.start();
    let mut node_offsets = Vec::new();
    let mut paragraphs = Vec::new();
    for node in &doc.nodes[range.clone()] {
        node_offsets.push(paragraphs.len());
        paragraphs.extend(node.display_lines().into_iter().map(Node::paragraph));
    }
    let count = paragraphs.len();
    log::debug!("Unwrapped code blocks {range:?} into {count} paragraphs");
    doc.nodes.splice(range, paragraphs);

    doc.selection = doc.selection.map(|point| {
        DocPoint::new(
            first + node_offsets[point.node - first] + point.caret.line,
            0,
            point.caret.column,
        )
    });
    (first..first + count).collect()
}

pub(crate) fn set_language(doc: &mut Document, language: &str) -> Vec<usize> {
    let range = doc.selection.start().node..=doc.selection.end().node;
    range
        .filter(|&index| {
            doc.nodes[index]
                .as_code_block_mut()
                .is_some_and(|block| block.set_language(language))
        })
        .collect()
}

pub(crate) fn indent(doc: &mut Document) -> Vec<usize> {
    let mut changed = Vec::new();
    for (index, lines) in selected_code_lines(doc) {
        let Some(block) = doc.nodes[index].as_code_block_mut() else {
            continue;
        };
        let indented = block.indent_lines(lines);
        shift_carets(doc, index, &indented, |column| column + 1);
        changed.push(index);
    }
    changed
}

pub(crate) fn outdent(doc: &mut Document) -> Vec<usize> {
    selected_code_lines(doc)
        .into_iter()
        .flat_map(|(index, lines)| outdent_lines(doc, index, lines))
        .collect()
}

/// Outdent a line range of one code block, moving carets on the affected
/// lines with the removed tab
pub(crate) fn outdent_lines(
    doc: &mut Document,
    index: usize,
    lines: RangeInclusive<usize>,
) -> Vec<usize> {
    let Some(block) = doc.nodes[index].as_code_block_mut() else {
        return Vec::new();
    };
    let outdented = block.outdent_lines(lines);
    if outdented.is_empty() {
        return Vec::new();
    }
    shift_carets(doc, index, &outdented, |column| column.saturating_sub(1));
    vec![index]
}

pub(crate) fn move_line(doc: &mut Document, direction: VerticalDirection) -> Vec<usize> {
    let (start, end) = (doc.selection.start(), doc.selection.end());
    if start.node != end.node {
        log::trace!("Line move ignored: selection spans several nodes");
        return Vec::new();
    }
    let Some(block) = doc.nodes[start.node].as_code_block_mut() else {
        return Vec::new();
    };
    if !block.move_lines(start.caret.line..=end.caret.line, direction) {
        log::trace!("Line move {direction:?} ignored at block boundary");
        return Vec::new();
    }
    doc.selection = doc.selection.map(|mut point| {
        point.caret.line = match direction {
            VerticalDirection::Up => point.caret.line - 1,
            VerticalDirection::Down => point.caret.line + 1,
        };
        point
    });
    vec![start.node]
}

/// Line range of every code block the selection touches
fn selected_code_lines(doc: &Document) -> Vec<(usize, RangeInclusive<usize>)> {
    let (start, end) = (doc.selection.start(), doc.selection.end());
    (start.node..=end.node)
        .filter_map(|index| {
            let block = doc.nodes[index].as_code_block()?;
            let first = if index == start.node {
                start.caret.line
            } else {
                0
            };
            let last = if index == end.node {
                end.caret.line
            } else {
                block.line_count() - 1
            };
            Some((index, first..=last))
        })
        .collect()
}

fn shift_carets(doc: &mut Document, index: usize, lines: &[usize], shift: impl Fn(usize) -> usize) {
    doc.selection = doc.selection.map(|mut point| {
        if point.node == index && lines.contains(&point.caret.line) {
            point.caret.column = shift(point.caret.column);
        }
        point
    });
}
