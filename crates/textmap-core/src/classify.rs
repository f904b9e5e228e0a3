//! Node classification shared by extraction and location.
//!
//! Both traversal directions ask the same `Classifier`, so the newline
//! decisions they make are identical and the mapping stays invertible.

use std::collections::HashSet;

use smol_str::SmolStr;

use crate::config::MapperConfig;
use crate::tree::{DocumentTree, NodeType};

/// How a node participates in linearization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Contributes its raw characters.
    Text,
    /// Starts a new visual line unless already at a line start.
    Block,
    /// Forces exactly one newline, holds no text.
    ManualBreak,
    /// Anything else. Contributes its descendants' text and nothing more.
    Inline,
}

/// Compiled form of a `MapperConfig`.
#[derive(Debug, Clone)]
pub struct Classifier {
    block_tags: HashSet<SmolStr>,
    break_tags: HashSet<SmolStr>,
    editable_attribute: SmolStr,
    editable_values: HashSet<SmolStr>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&MapperConfig::default())
    }
}

fn lowered(tags: &[SmolStr]) -> HashSet<SmolStr> {
    tags.iter()
        .map(|t| SmolStr::new(t.to_ascii_lowercase()))
        .collect()
}

impl Classifier {
    pub fn new(config: &MapperConfig) -> Self {
        Self {
            block_tags: lowered(&config.block_tags),
            break_tags: lowered(&config.break_tags),
            editable_attribute: config.editable_attribute.clone(),
            editable_values: lowered(&config.editable_values),
        }
    }

    pub fn classify<T: DocumentTree>(&self, tree: &T, node: &T::Node) -> NodeClass {
        match tree.node_type(node) {
            NodeType::Text => NodeClass::Text,
            NodeType::Other => NodeClass::Inline,
            NodeType::Element => {
                let Some(tag) = tree.tag_name(node) else {
                    return NodeClass::Inline;
                };
                // DOM reports HTML tag names upper-cased.
                let tag = tag.to_ascii_lowercase();
                if self.break_tags.contains(tag.as_str()) {
                    NodeClass::ManualBreak
                } else if self.block_tags.contains(tag.as_str()) {
                    NodeClass::Block
                } else {
                    NodeClass::Inline
                }
            }
        }
    }

    /// Whether `node` carries the editable marker itself.
    pub fn is_editable<T: DocumentTree>(&self, tree: &T, node: &T::Node) -> bool {
        if tree.node_type(node) != NodeType::Element {
            return false;
        }
        tree.attribute(node, &self.editable_attribute)
            .is_some_and(|value| {
                self.editable_values
                    .contains(value.trim().to_ascii_lowercase().as_str())
            })
    }
}
