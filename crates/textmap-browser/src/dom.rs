//! `DocumentTree` over the live DOM.
//!
//! Node handles are `web_sys::Node`; equality is JS identity. Nothing is
//! cached, every call reads the document as it is right now.

use std::borrow::Cow;

use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use textmap_core::{DocumentTree, NodeType};

/// The browser document as a `DocumentTree`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomTree;

impl DocumentTree for DomTree {
    type Node = Node;

    fn node_type(&self, node: &Node) -> NodeType {
        match node.node_type() {
            Node::TEXT_NODE | Node::CDATA_SECTION_NODE => NodeType::Text,
            Node::ELEMENT_NODE => NodeType::Element,
            _ => NodeType::Other,
        }
    }

    fn tag_name(&self, node: &Node) -> Option<Cow<'_, str>> {
        node.dyn_ref::<Element>()
            .map(|element| Cow::Owned(element.tag_name()))
    }

    fn text(&self, node: &Node) -> Option<Cow<'_, str>> {
        if self.node_type(node) != NodeType::Text {
            return None;
        }
        node.node_value().map(Cow::Owned)
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<Cow<'_, str>> {
        node.dyn_ref::<Element>()?
            .get_attribute(name)
            .map(Cow::Owned)
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }
}
