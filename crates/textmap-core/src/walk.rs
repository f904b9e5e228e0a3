//! The linearization traversal.
//!
//! Extraction, location and the segment dump all run this one walk with a
//! different `Visitor`, so they agree on every synthetic newline. The line
//! state is threaded through the recursion as a return value; the walker
//! itself holds nothing mutable.

use crate::classify::{Classifier, NodeClass};
use crate::text::utf16_prefix;
use crate::tree::DocumentTree;
use crate::types::TreePosition;

/// Why a synthetic newline was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// Transition into or out of a block element.
    Block,
    /// A manual break element (`<br>`).
    Manual,
}

/// What the most recent emission was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineState {
    /// Nothing emitted yet. Counts as being at a line start.
    Start,
    /// Last emission was text, so a block boundary needs a newline.
    MidLine,
    /// A block newline was just emitted.
    AfterBlock,
    /// A manual break newline was just emitted.
    AfterManual,
}

/// A synthetic newline, with the tree positions on either side of it.
#[derive(Debug, Clone)]
pub(crate) struct LineBreak<N> {
    pub kind: BreakKind,
    /// Last tree position whose linear offset is in front of the newline.
    pub before: TreePosition<N>,
    /// First tree position whose linear offset is past the newline.
    pub after: TreePosition<N>,
}

/// Stops the traversal.
#[derive(Debug)]
pub(crate) struct Halt;

pub(crate) type Flow = Result<(), Halt>;

pub(crate) trait Visitor<N> {
    fn text(&mut self, node: &N, text: &str) -> Flow;
    fn line_break(&mut self, brk: LineBreak<N>) -> Flow;
}

pub(crate) struct Walker<'a, T: DocumentTree> {
    tree: &'a T,
    classifier: &'a Classifier,
    anchor: &'a T::Node,
    boundary: Option<&'a TreePosition<T::Node>>,
}

impl<'a, T: DocumentTree> Walker<'a, T> {
    pub fn new(tree: &'a T, classifier: &'a Classifier, anchor: &'a T::Node) -> Self {
        Self {
            tree,
            classifier,
            anchor,
            boundary: None,
        }
    }

    /// Halt the traversal when it reaches `boundary`, after emitting the
    /// content in front of it.
    pub fn stop_at(mut self, boundary: Option<&'a TreePosition<T::Node>>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Walk the anchor's subtree. Returns true if the walk was halted, by
    /// the boundary or by the visitor, rather than running off the end.
    pub fn run<V: Visitor<T::Node>>(&self, visitor: &mut V) -> bool {
        let result = match self.boundary {
            Some(boundary) if boundary.node == *self.anchor => self
                .walk_children(
                    self.anchor,
                    Some(boundary.offset),
                    true,
                    LineState::Start,
                    visitor,
                )
                .and_then(|_| Err::<(), _>(Halt)),
            _ => self
                .walk_children(self.anchor, None, true, LineState::Start, visitor)
                .map(|_| ()),
        };
        result.is_err()
    }

    /// Walk `parent`'s children, up to `limit` of them. `trailing` is true
    /// when nothing with content follows `parent` inside the anchor.
    fn walk_children<V: Visitor<T::Node>>(
        &self,
        parent: &T::Node,
        limit: Option<usize>,
        trailing: bool,
        mut state: LineState,
        visitor: &mut V,
    ) -> Result<LineState, Halt> {
        let children = self.tree.children(parent);
        // Index of the last child with content; everything after it is
        // trailing if the parent is.
        let last_content = children.iter().rposition(|child| self.has_content(child));
        let end = limit.map_or(children.len(), |limit| limit.min(children.len()));
        for (index, child) in children.iter().take(end).enumerate() {
            let last_meaningful = trailing && last_content.is_none_or(|last| last <= index);
            state = self.walk_node(parent, index, child, last_meaningful, state, visitor)?;
        }
        Ok(state)
    }

    fn walk_node<V: Visitor<T::Node>>(
        &self,
        parent: &T::Node,
        index: usize,
        node: &T::Node,
        last_meaningful: bool,
        mut state: LineState,
        visitor: &mut V,
    ) -> Result<LineState, Halt> {
        let class = self.classifier.classify(self.tree, node);

        // Prefix: a block opens a new line unless we're already at one, or
        // it is empty and nothing follows it.
        if class == NodeClass::Block
            && state == LineState::MidLine
            && (!last_meaningful || self.has_content(node))
        {
            visitor.line_break(LineBreak {
                kind: BreakKind::Block,
                before: TreePosition::new(parent.clone(), index),
                after: TreePosition::new(node.clone(), 0),
            })?;
            state = LineState::AfterBlock;
        }

        if let Some(boundary) = self.boundary.filter(|b| b.node == *node) {
            if class == NodeClass::Text {
                let text = self.tree.text(node).unwrap_or_default();
                visitor.text(node, utf16_prefix(&text, boundary.offset))?;
            } else {
                self.walk_children(
                    node,
                    Some(boundary.offset),
                    last_meaningful,
                    state,
                    visitor,
                )?;
            }
            return Err(Halt);
        }

        if class == NodeClass::Text {
            let text = self.tree.text(node).unwrap_or_default();
            visitor.text(node, &text)?;
            if !text.is_empty() {
                state = LineState::MidLine;
            }
            return Ok(state);
        }

        state = self.walk_children(node, None, last_meaningful, state, visitor)?;

        // Postfix: close the block's line, or emit the manual break.
        match class {
            NodeClass::Block if state == LineState::MidLine && !last_meaningful => {
                let child_count = self.tree.children(node).len();
                visitor.line_break(LineBreak {
                    kind: BreakKind::Block,
                    before: TreePosition::new(node.clone(), child_count),
                    after: TreePosition::new(parent.clone(), index + 1),
                })?;
                state = LineState::AfterBlock;
            }
            NodeClass::ManualBreak if !last_meaningful => {
                visitor.line_break(LineBreak {
                    kind: BreakKind::Manual,
                    before: TreePosition::new(parent.clone(), index),
                    after: TreePosition::new(parent.clone(), index + 1),
                })?;
                state = LineState::AfterManual;
            }
            _ => {}
        }

        Ok(state)
    }

    fn has_content(&self, node: &T::Node) -> bool {
        match self.classifier.classify(self.tree, node) {
            NodeClass::Text => self.tree.text(node).is_some_and(|t| !t.is_empty()),
            NodeClass::ManualBreak => true,
            NodeClass::Block | NodeClass::Inline => self
                .tree
                .children(node)
                .iter()
                .any(|child| self.has_content(child)),
        }
    }
}
