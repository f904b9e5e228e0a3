//! In-memory host: an arena document tree plus fake selection and input.
//!
//! Used by the engine's own tests and by embedders that keep their document
//! outside a browser.

use std::borrow::Cow;

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use crate::platform::{InputSimulator, PlatformError, SelectionPort};
use crate::tree::{DocumentTree, NodeType};
use crate::types::TreePosition;

/// Handle to a node in a `MemTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum MarkupError {
    #[error("malformed markup")]
    #[diagnostic(code(textmap::mem::parse))]
    Parse(#[from] roxmltree::Error),
}

#[derive(Debug, Clone)]
enum MemKind {
    Document,
    Element {
        tag: SmolStr,
        attributes: Vec<(SmolStr, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct MemNode {
    kind: MemKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree. Node 0 is the document itself.
#[derive(Debug, Clone)]
pub struct MemTree {
    nodes: Vec<MemNode>,
}

impl Default for MemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![MemNode {
                kind: MemKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node. Has no tag and no parent.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: NodeId, kind: MemKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MemNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent.index()) {
            parent.children.push(id);
        }
        id
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            MemKind::Element {
                tag: SmolStr::new(tag),
                attributes: Vec::new(),
            },
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, MemKind::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, MemKind::Comment(text.to_string()))
    }

    /// Set or replace an attribute. No-op on anything but an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(MemNode {
            kind: MemKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(node.index())
        else {
            return;
        };
        match attributes.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((SmolStr::new(name), value.to_string())),
        }
    }

    /// Replace a text node's data. No-op on anything but a text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(MemNode {
            kind: MemKind::Text(data),
            ..
        }) = self.nodes.get_mut(node.index())
        {
            *data = text.to_string();
        }
    }

    /// Parse an XHTML fragment. The fragment's root element becomes the
    /// only child of the document node.
    ///
    /// Entities are resolved (`&#160;` becomes U+00A0) and whitespace-only
    /// text is kept.
    pub fn parse_xhtml(markup: &str) -> Result<Self, MarkupError> {
        let doc = roxmltree::Document::parse(markup)?;
        let mut tree = Self::new();
        let root = tree.root();
        tree.import(root, doc.root_element());
        Ok(tree)
    }

    fn import(&mut self, parent: NodeId, source: roxmltree::Node<'_, '_>) {
        if source.is_element() {
            let id = self.append_element(parent, source.tag_name().name());
            for attr in source.attributes() {
                self.set_attribute(id, attr.name(), attr.value());
            }
            for child in source.children() {
                self.import(id, child);
            }
        } else if source.is_text() {
            self.append_text(parent, source.text().unwrap_or_default());
        } else if source.is_comment() {
            self.append_comment(parent, source.text().unwrap_or_default());
        }
    }

    /// All nodes under `node` (inclusive) in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(n) = self.nodes.get(current.index()) {
                stack.extend(n.children.iter().rev());
            }
        }
        out
    }

    /// First element whose `id` attribute is `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.attribute(n, "id").as_deref() == Some(id))
    }

    /// First text node whose data is exactly `text`.
    pub fn find_text(&self, text: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| matches!(self.kind(*n), Some(MemKind::Text(data)) if data == text))
    }

    fn kind(&self, node: NodeId) -> Option<&MemKind> {
        self.nodes.get(node.index()).map(|n| &n.kind)
    }
}

impl DocumentTree for MemTree {
    type Node = NodeId;

    fn node_type(&self, node: &NodeId) -> NodeType {
        match self.kind(*node) {
            Some(MemKind::Text(_)) => NodeType::Text,
            Some(MemKind::Element { .. }) => NodeType::Element,
            _ => NodeType::Other,
        }
    }

    fn tag_name(&self, node: &NodeId) -> Option<Cow<'_, str>> {
        match self.kind(*node)? {
            MemKind::Element { tag, .. } => Some(Cow::Borrowed(tag.as_str())),
            _ => None,
        }
    }

    fn text(&self, node: &NodeId) -> Option<Cow<'_, str>> {
        match self.kind(*node)? {
            MemKind::Text(data) => Some(Cow::Borrowed(data.as_str())),
            _ => None,
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<Cow<'_, str>> {
        match self.kind(*node)? {
            MemKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n.as_str() == name)
                .map(|(_, v)| Cow::Borrowed(v.as_str())),
            _ => None,
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.index())?.parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.index())
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }
}

/// Fake selection that behaves like a DOM `Selection`: it can hold several
/// ranges, and `install` removes them all before adding the new one.
#[derive(Debug, Clone)]
pub struct MemSelection<N = NodeId> {
    ranges: Vec<(TreePosition<N>, TreePosition<N>)>,
    focus: Option<N>,
    installs: usize,
    clears: usize,
    failure: Option<String>,
}

impl<N> Default for MemSelection<N> {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            focus: None,
            installs: 0,
            clears: 0,
            failure: None,
        }
    }
}

impl<N: Clone> MemSelection<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding one caret, as if the user had clicked there.
    pub fn with_caret(position: TreePosition<N>) -> Self {
        let mut selection = Self::new();
        selection.add_range(position.clone(), position);
        selection
    }

    /// Add a range without clearing, the way a user's ctrl-drag does.
    pub fn add_range(&mut self, start: TreePosition<N>, end: TreePosition<N>) {
        self.ranges.push((start, end));
    }

    pub fn remove_all_ranges(&mut self) {
        self.clears += 1;
        self.ranges.clear();
    }

    /// Track focus separately from the selection.
    pub fn set_focus(&mut self, node: Option<N>) {
        self.focus = node;
    }

    pub fn ranges(&self) -> &[(TreePosition<N>, TreePosition<N>)] {
        &self.ranges
    }

    /// Successful `install` calls so far.
    pub fn installs(&self) -> usize {
        self.installs
    }

    /// `remove_all_ranges` calls so far.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Make every following `install` fail with `message`.
    pub fn fail_installs(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}

impl<N: Clone> SelectionPort<N> for MemSelection<N> {
    fn active_boundary(&self) -> Option<TreePosition<N>> {
        self.ranges.first().map(|(start, _)| start.clone())
    }

    fn focused_node(&self) -> Option<N> {
        self.focus
            .clone()
            .or_else(|| self.active_boundary().map(|pos| pos.node))
    }

    fn install(
        &mut self,
        start: TreePosition<N>,
        end: Option<TreePosition<N>>,
    ) -> Result<(), PlatformError> {
        if let Some(message) = &self.failure {
            return Err(PlatformError(message.clone()));
        }
        self.remove_all_ranges();
        let end = end.unwrap_or_else(|| start.clone());
        self.add_range(start, end);
        self.installs += 1;
        Ok(())
    }
}

/// An input request seen by `RecordingInput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOp {
    Insert(String),
    DeleteBackward(usize),
}

/// Input simulator that records requests instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingInput {
    pub ops: Vec<InputOp>,
}

impl InputSimulator for RecordingInput {
    fn insert_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.ops.push(InputOp::Insert(text.to_string()));
        Ok(())
    }

    fn delete_backward(&mut self, count: usize) -> Result<(), PlatformError> {
        self.ops.push(InputOp::DeleteBackward(count));
        Ok(())
    }
}
