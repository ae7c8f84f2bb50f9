use crate::editing::tracker::{RenderAddress, RenderLayout};
use crate::editing::{Cmd, DocPoint, Patch, Selection, commands};
use crate::models::Node;
use crate::settings::EditorSettings;

/// Editable document: an ordered list of paragraphs and code blocks plus the
/// selection that commands act on.
///
/// ## Editing Model
///
/// - **Closed node set**: every node is a [`Node::Paragraph`] or a
///   [`Node::CodeBlock`]; there is always at least one node
/// - **Command reducer**: all edits flow through [`Document::apply`], which
///   runs one [`Cmd`] to completion and reports a [`Patch`]
/// - **Logical selection**: carets are (node, line, column) points; render
///   addresses are derived on demand from the current token layout
/// - **Total commands**: a command that cannot apply leaves the document
///   unchanged and returns an empty patch
///
/// ## Usage Pattern
///
/// ```rust
/// # use codefence_engine::editing::{Cmd, Document};
/// # use codefence_engine::models::Node;
/// let mut doc = Document::default();
///
/// // Opening fence followed by a space starts a code block
/// doc.apply(Cmd::insert_text("```"));
/// let patch = doc.apply(Cmd::insert_text(" "));
/// assert_eq!(patch.changed, vec![0]);
///
/// doc.apply(Cmd::insert_text("alert(1);"));
/// let block = doc.node(0).and_then(Node::as_code_block).unwrap();
/// assert_eq!(block.gutter(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Never empty
    pub(crate) nodes: Vec<Node>,
    pub(crate) selection: Selection,
    /// Column vertical movement aims for; cleared by any other command
    pub(crate) goal_column: Option<usize>,
    /// Incremented by every command that changes content
    pub(crate) version: u64,
    pub(crate) settings: EditorSettings,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Document {
    /// One empty paragraph with the caret at its start
    pub fn new(settings: EditorSettings) -> Self {
        Self::from_nodes(Vec::new(), settings)
    }

    pub fn from_paragraphs<I, S>(paragraphs: I, settings: EditorSettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_nodes(paragraphs.into_iter().map(Node::paragraph).collect(), settings)
    }

    /// An empty node list becomes one empty paragraph
    pub fn from_nodes(mut nodes: Vec<Node>, settings: EditorSettings) -> Self {
        if nodes.is_empty() {
            nodes.push(Node::paragraph(""));
        }
        Self {
            nodes,
            selection: Selection::default(),
            goal_column: None,
            version: 0,
            settings,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.settings = settings;
    }

    /// Nearest valid point: the node index clamps to the last node, the
    /// caret to that node's content
    pub fn clamp_point(&self, point: DocPoint) -> DocPoint {
        let node = point.node.min(self.nodes.len() - 1);
        DocPoint::at(node, self.nodes[node].clamp(point.caret))
    }

    /// End of the last node
    pub fn end(&self) -> DocPoint {
        let last = self.nodes.len() - 1;
        DocPoint::at(last, self.nodes[last].end())
    }

    /// Apply a command and report what changed.
    ///
    /// The version only moves when node content changed, so caret movement
    /// and no-op edits leave it alone.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        if !cmd.is_vertical_move() {
            self.goal_column = None;
        }

        let mut changed = commands::run_command(self, &cmd);
        changed.sort_unstable();
        changed.dedup();

        if changed.is_empty() {
            log::trace!("{cmd:?} changed no content");
        } else {
            self.version += 1;
            log::debug!(
                "Applied {cmd:?}: changed nodes {changed:?}, version {}",
                self.version
            );
        }

        Patch {
            changed,
            new_selection: self.selection,
            version: self.version,
        }
    }

    /// Token layout of a code block node, `None` for paragraphs
    pub fn render_layout(&self, node: usize) -> Option<RenderLayout> {
        self.nodes
            .get(node)
            .and_then(Node::as_code_block)
            .map(RenderLayout::new)
    }

    /// Render address of a point inside a code block
    pub fn render_address(&self, point: DocPoint) -> Option<RenderAddress> {
        self.render_layout(point.node)
            .map(|layout| layout.to_render_address(point.caret))
    }

    /// Document point for a render address inside a code block
    pub fn caret_at(&self, node: usize, address: RenderAddress) -> Option<DocPoint> {
        self.render_layout(node)
            .map(|layout| DocPoint::at(node, layout.to_caret_position(address)))
    }
}
