//! Document Model
//!
//! The visible page body: a flat, ordered list of nodes. Status changes
//! clear the body and leave a single text node; payloads are appended as
//! preformatted blocks.

use std::fmt;

/// Identifier of a node within one document. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain status text (connection open, closed, error message)
    Text(String),
    /// Preformatted, pretty-printed payload
    Pre(String),
    /// A payload that could not be decoded
    Diagnostic(String),
}

impl Node {
    pub fn text(&self) -> &str {
        match self {
            Node::Text(text) | Node::Pre(text) | Node::Diagnostic(text) => text,
        }
    }

    /// Whether this node was produced by a `message` event.
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Pre(_) | Node::Diagnostic(_))
    }
}

#[derive(Debug, Default, Clone)]
pub struct Document {
    nodes: Vec<(NodeId, Node)>,
    next_id: u64,
    scrolled_to: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    /// Replace the whole body with a single text node.
    pub fn replace_body(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.clear();
        self.scrolled_to = None;
        let id = self.allocate();
        self.nodes.push((id, Node::Text(text.into())));
        id
    }

    /// Append a node to the end of the body.
    pub fn append(&mut self, node: Node) -> NodeId {
        let id = self.allocate();
        self.nodes.push((id, node));
        id
    }

    /// Bring a node into view. Unknown ids are ignored.
    pub fn scroll_into_view(&mut self, id: NodeId) {
        if self.get(id).is_some() {
            self.scrolled_to = Some(id);
        } else {
            log::debug!("scroll_into_view: no node {}", id);
        }
    }

    pub fn scrolled_to(&self) -> Option<NodeId> {
        self.scrolled_to
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        // Ids are allocated in increasing order, so `nodes` stays sorted
        self.nodes
            .binary_search_by_key(&id, |(node_id, _)| *node_id)
            .ok()
            .map(|index| &self.nodes[index].1)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// Payload blocks in the order they were appended.
    pub fn blocks(&self) -> Vec<&Node> {
        self.nodes().filter(|node| node.is_block()).collect()
    }

    /// Visible text of the whole body, one node per line.
    pub fn text(&self) -> String {
        self.nodes()
            .map(Node::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
