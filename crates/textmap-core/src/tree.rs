//! Read-only document tree abstraction.
//!
//! The engine never owns the document. Hosts (the browser DOM, the in-memory
//! `MemTree`, anything else) implement `DocumentTree` over their own node
//! handles and the engine walks it at call time.

use std::borrow::Cow;
use std::fmt;

use crate::classify::Classifier;

/// The coarse type of a node, as far as linearization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Holds character data.
    Text,
    /// Holds a tag, attributes and ordered children.
    Element,
    /// Comments, processing instructions, doctype, document roots.
    /// Contributes nothing but may still have children to walk.
    Other,
}

/// A tree of text and element nodes owned by the host document.
///
/// Child order is significant: it is the traversal order.
pub trait DocumentTree {
    /// Handle to a node. Equality must be node identity.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Coarse node type.
    fn node_type(&self, node: &Self::Node) -> NodeType;

    /// Tag name for elements, None otherwise. Case is not normalized.
    fn tag_name(&self, node: &Self::Node) -> Option<Cow<'_, str>>;

    /// Character data for text nodes, None otherwise.
    fn text(&self, node: &Self::Node) -> Option<Cow<'_, str>>;

    /// Attribute value for elements, None if absent or not an element.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<Cow<'_, str>>;

    /// Parent node, None at the root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Ordered children.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Index of `node` among its parent's children.
    fn index_in_parent(&self, node: &Self::Node) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(&parent).iter().position(|c| c == node)
    }
}

/// Walk upward from `start` (inclusive) to the nearest editable element.
///
/// Returns None when nothing above `start` is editable. That is the normal
/// "nothing to edit" outcome, not an error.
pub fn find_editable_anchor<T: DocumentTree>(
    tree: &T,
    classifier: &Classifier,
    start: &T::Node,
) -> Option<T::Node> {
    let mut current = Some(start.clone());
    while let Some(node) = current {
        if classifier.is_editable(tree, &node) {
            return Some(node);
        }
        current = tree.parent(&node);
    }
    tracing::debug!(target: "textmap::anchor", start = ?start, "no editable anchor above node");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemTree;

    #[test]
    fn test_anchor_from_text_node() {
        let tree = MemTree::parse_xhtml(
            r#"<body><div id="ed" contenteditable="true"><p><b>deep</b></p></div></body>"#,
        )
        .unwrap();
        let classifier = Classifier::default();
        let text = tree.find_text("deep").unwrap();
        let anchor = find_editable_anchor(&tree, &classifier, &text);
        assert_eq!(anchor, tree.find_by_id("ed"));
    }

    #[test]
    fn test_anchor_is_self() {
        let tree =
            MemTree::parse_xhtml(r#"<div id="ed" contenteditable="">x</div>"#).unwrap();
        let classifier = Classifier::default();
        let ed = tree.find_by_id("ed").unwrap();
        assert_eq!(find_editable_anchor(&tree, &classifier, &ed), Some(ed));
    }

    #[test]
    fn test_no_anchor() {
        let tree = MemTree::parse_xhtml(r#"<div><p id="p">static</p></div>"#).unwrap();
        let classifier = Classifier::default();
        let p = tree.find_by_id("p").unwrap();
        assert_eq!(find_editable_anchor(&tree, &classifier, &p), None);
    }

    #[test]
    fn test_non_editable_island_walks_past() {
        let tree = MemTree::parse_xhtml(
            r#"<div id="ed" contenteditable="true"><span contenteditable="false">chip</span></div>"#,
        )
        .unwrap();
        let classifier = Classifier::default();
        let chip = tree.find_text("chip").unwrap();
        assert_eq!(
            find_editable_anchor(&tree, &classifier, &chip),
            tree.find_by_id("ed")
        );
    }

    #[test]
    fn test_index_in_parent() {
        let tree = MemTree::parse_xhtml(r#"<div><a id="a"/><b id="b"/></div>"#).unwrap();
        let b = tree.find_by_id("b").unwrap();
        assert_eq!(tree.index_in_parent(&b), Some(1));
        assert_eq!(tree.index_in_parent(&tree.root()), None);
    }
}
