use crate::editing::Selection;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Indices (in the updated document) of nodes whose content changed,
    /// ascending and without duplicates
    pub changed: Vec<usize>,
    pub new_selection: Selection,
    pub version: u64,
}

impl Patch {
    /// True when the command left every node untouched
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
