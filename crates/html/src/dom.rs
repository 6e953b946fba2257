//! Arena-backed document tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Children are
//! owned by position in the arena; `parent` is a plain id back-reference. The
//! document root is always `NodeId(0)` and is the only node without a parent.
use css::{ComputedStyle, ResolvedStyle, SelectorSubject};
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Result<Self, DocumentError> {
        let raw: u32 = index.try_into().map_err(|_| DocumentError::OutOfIds)?;
        Ok(NodeId(raw))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// The arena already holds `u32::MAX + 1` nodes.
    OutOfIds,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::OutOfIds => f.write_str("document node id space exhausted"),
        }
    }
}

impl std::error::Error for DocumentError {}

pub const DOCUMENT_TAG_NAME: &str = "#document";

#[derive(Clone, Debug, PartialEq)]
pub struct ElementData {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Cascaded declarations, present once at least one rule matched.
    pub computed_style: Option<ComputedStyle>,
    /// Layout-resolved style, present once the layout pass ran on the element.
    pub style: Option<ResolvedStyle>,
}

impl ElementData {
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
            computed_style: None,
            style: None,
        }
    }

    // Last occurrence wins.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl SelectorSubject for ElementData {
    fn tag_name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.get_attribute(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn tag_name(&self) -> &str {
        match &self.kind {
            NodeKind::Document => DOCUMENT_TAG_NAME,
            NodeKind::Element(element) => &element.name,
            NodeKind::Text(_) => "#text",
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: NodeId::ROOT,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // The root always exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children only, in document order.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self[child].is_element())
            .collect()
    }

    /// Parent, grandparent, ..., root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Appends a new node as the last child of `parent`.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
    ) -> Result<NodeId, DocumentError> {
        let id = NodeId::from_index(self.nodes.len())?;
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self[parent].children.push(id);
        Ok(id)
    }

    pub(crate) fn push_text(&mut self, id: NodeId, more: &str) {
        if let NodeKind::Text(text) = &mut self[id].kind {
            text.push_str(more);
        }
    }

    /// Elements named `name` in document order.
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if node.as_element().is_some_and(|e| e.name == name) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self[current];
            if let Some(text) = node.text() {
                out.push_str(text);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
