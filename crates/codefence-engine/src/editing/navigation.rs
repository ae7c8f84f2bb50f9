//! Caret movement and selection commands. None of these change content, so
//! they all report no changed nodes.

use crate::editing::{Direction, DocPoint, Document, Selection, tracker};

pub(crate) fn move_caret(doc: &mut Document, direction: Direction, extend: bool) -> Vec<usize> {
    let selection = doc.selection;
    if !extend && !selection.is_collapsed() {
        match direction {
            Direction::Left => {
                doc.selection = Selection::collapsed(selection.start());
                return Vec::new();
            }
            Direction::Right => {
                doc.selection = Selection::collapsed(selection.end());
                return Vec::new();
            }
            Direction::Up | Direction::Down => {}
        }
    }

    let target = match direction {
        Direction::Left => step_left(doc, selection.focus),
        Direction::Right => step_right(doc, selection.focus),
        Direction::Up => {
            let goal = *doc.goal_column.get_or_insert(selection.focus.caret.column);
            step_up(doc, selection.focus, goal)
        }
        Direction::Down => {
            let goal = *doc.goal_column.get_or_insert(selection.focus.caret.column);
            step_down(doc, selection.focus, goal)
        }
    };
    doc.selection = selection.with_focus(target, extend);
    Vec::new()
}

fn step_left(doc: &Document, point: DocPoint) -> DocPoint {
    match tracker::char_before(&doc.nodes[point.node], point.caret) {
        Some(caret) => DocPoint::at(point.node, caret),
        None if point.node > 0 => DocPoint::at(point.node - 1, doc.nodes[point.node - 1].end()),
        None => point,
    }
}

fn step_right(doc: &Document, point: DocPoint) -> DocPoint {
    match tracker::char_after(&doc.nodes[point.node], point.caret) {
        Some(caret) => DocPoint::at(point.node, caret),
        None if point.node + 1 < doc.nodes.len() => DocPoint::new(point.node + 1, 0, 0),
        None => point,
    }
}

fn step_up(doc: &Document, point: DocPoint, goal: usize) -> DocPoint {
    if let Some(caret) = tracker::line_above(&doc.nodes[point.node], point.caret, goal) {
        return DocPoint::at(point.node, caret);
    }
    let Some(previous) = point.node.checked_sub(1) else {
        return DocPoint::new(0, 0, 0);
    };
    let node = &doc.nodes[previous];
    let line = node.line_count() - 1;
    DocPoint::new(previous, line, goal.min(node.line_len(line)))
}

fn step_down(doc: &Document, point: DocPoint, goal: usize) -> DocPoint {
    if let Some(caret) = tracker::line_below(&doc.nodes[point.node], point.caret, goal) {
        return DocPoint::at(point.node, caret);
    }
    let next = point.node + 1;
    match doc.nodes.get(next) {
        Some(node) => DocPoint::new(next, 0, goal.min(node.line_len(0))),
        None => doc.end(),
    }
}

pub(crate) fn move_to_line_start(doc: &mut Document, extend: bool) -> Vec<usize> {
    let focus = doc.selection.focus;
    let caret = tracker::line_start(&doc.nodes[focus.node], focus.caret);
    doc.selection = doc.selection.with_focus(DocPoint::at(focus.node, caret), extend);
    Vec::new()
}

pub(crate) fn move_to_line_end(doc: &mut Document, extend: bool) -> Vec<usize> {
    let focus = doc.selection.focus;
    let caret = tracker::line_end(&doc.nodes[focus.node], focus.caret);
    doc.selection = doc.selection.with_focus(DocPoint::at(focus.node, caret), extend);
    Vec::new()
}

pub(crate) fn move_to_block_start(doc: &mut Document, extend: bool) -> Vec<usize> {
    let node = doc.selection.focus.node;
    let caret = tracker::block_start(&doc.nodes[node]);
    doc.selection = doc.selection.with_focus(DocPoint::at(node, caret), extend);
    Vec::new()
}

pub(crate) fn move_to_block_end(doc: &mut Document, extend: bool) -> Vec<usize> {
    let node = doc.selection.focus.node;
    let caret = tracker::block_end(&doc.nodes[node]);
    doc.selection = doc.selection.with_focus(DocPoint::at(node, caret), extend);
    Vec::new()
}

pub(crate) fn move_to_document_start(doc: &mut Document, extend: bool) -> Vec<usize> {
    doc.selection = doc.selection.with_focus(DocPoint::default(), extend);
    Vec::new()
}

pub(crate) fn move_to_document_end(doc: &mut Document, extend: bool) -> Vec<usize> {
    doc.selection = doc.selection.with_focus(doc.end(), extend);
    Vec::new()
}

pub(crate) fn select_all(doc: &mut Document) -> Vec<usize> {
    doc.selection = Selection::new(DocPoint::default(), doc.end());
    Vec::new()
}

pub(crate) fn set_selection(doc: &mut Document, selection: Selection) -> Vec<usize> {
    doc.selection = selection.map(|point| doc.clamp_point(point));
    Vec::new()
}
