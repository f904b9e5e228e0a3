//! `TextMapper`: the facade a controller talks to.
//!
//! Bundles a document tree, the document's selection port and a compiled
//! classifier, and exposes `source` / `cursor` / `set_cursor` on top of the
//! pure mapping functions.

use crate::classify::Classifier;
use crate::config::MapperConfig;
use crate::extract::{self, Segment};
use crate::locate::{self, Located};
use crate::platform::{PlatformError, SelectionPort};
use crate::tree::{self, DocumentTree};
use crate::types::TreePosition;

pub struct TextMapper<T: DocumentTree, S> {
    tree: T,
    selection: S,
    classifier: Classifier,
}

impl<T, S> TextMapper<T, S>
where
    T: DocumentTree,
    S: SelectionPort<T::Node>,
{
    pub fn new(tree: T, selection: S) -> Self {
        Self::with_config(tree, selection, &MapperConfig::default())
    }

    pub fn with_config(tree: T, selection: S, config: &MapperConfig) -> Self {
        Self {
            tree,
            selection,
            classifier: Classifier::new(config),
        }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn into_parts(self) -> (T, S) {
        (self.tree, self.selection)
    }

    pub fn find_editable_anchor(&self, node: &T::Node) -> Option<T::Node> {
        tree::find_editable_anchor(&self.tree, &self.classifier, node)
    }

    /// Editable anchor around whatever has focus.
    pub fn focused_anchor(&self) -> Option<T::Node> {
        let focused = self.selection.focused_node()?;
        self.find_editable_anchor(&focused)
    }

    pub fn extract_text(
        &self,
        anchor: &T::Node,
        boundary: Option<&TreePosition<T::Node>>,
    ) -> String {
        extract::extract_text(&self.tree, &self.classifier, anchor, boundary)
    }

    pub fn segments(&self, anchor: &T::Node) -> Vec<Segment<T::Node>> {
        extract::segments(&self.tree, &self.classifier, anchor)
    }

    pub fn locate_offset(
        &self,
        anchor: &T::Node,
        start: usize,
        end: Option<usize>,
    ) -> Located<T::Node> {
        locate::locate_offset(&self.tree, &self.classifier, anchor, start, end)
    }

    pub fn current_offset(&self, anchor: &T::Node, boundary: &TreePosition<T::Node>) -> usize {
        extract::current_offset(&self.tree, &self.classifier, anchor, boundary)
    }

    /// Full linear text of the editable region containing `node`.
    ///
    /// None when `node` has no editable ancestor.
    pub fn source(&self, node: &T::Node) -> Option<String> {
        let anchor = self.find_editable_anchor(node)?;
        Some(self.extract_text(&anchor, None))
    }

    /// `source` for the focused region.
    pub fn focused_source(&self) -> Option<String> {
        let anchor = self.focused_anchor()?;
        Some(self.extract_text(&anchor, None))
    }

    /// Linear offset of the selection's anchor boundary inside its editable
    /// region. 0 when there is no selection or it isn't inside one.
    pub fn cursor(&self) -> usize {
        let Some(boundary) = self.selection.active_boundary() else {
            tracing::debug!(target: "textmap::mapper", "no active selection");
            return 0;
        };
        let Some(anchor) = self.find_editable_anchor(&boundary.node) else {
            tracing::debug!(target: "textmap::mapper", node = ?boundary.node, "selection outside editable region");
            return 0;
        };
        self.current_offset(&anchor, &boundary)
    }

    /// Put the caret (or a range selection) at linear offsets inside the
    /// focused editable region.
    ///
    /// Nothing focused or nothing editable is a no-op, not an error.
    pub fn set_cursor(&mut self, offset: usize, end: Option<usize>) -> Result<(), PlatformError> {
        let Some(anchor) = self.focused_anchor() else {
            tracing::debug!(target: "textmap::mapper", offset, "no focused editable region, ignoring set_cursor");
            return Ok(());
        };
        self.set_cursor_in(&anchor, offset, end).map(|_| ())
    }

    /// Locate `offset..end` inside `anchor` and install it as the selection.
    pub fn set_cursor_in(
        &mut self,
        anchor: &T::Node,
        offset: usize,
        end: Option<usize>,
    ) -> Result<Located<T::Node>, PlatformError> {
        let located = self.locate_offset(anchor, offset, end);
        let end_pos = (!located.is_collapsed()).then(|| located.end.clone());
        tracing::trace!(
            target: "textmap::mapper",
            start = ?located.start,
            end = ?end_pos,
            range = ?located.range,
            "installing selection"
        );
        if let Err(e) = self.selection.install(located.start.clone(), end_pos) {
            tracing::warn!(target: "textmap::mapper", error = %e, "failed to install selection");
            return Err(e);
        }
        Ok(located)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemSelection, MemTree, NodeId};

    const DOC: &str = r#"<body><p id="static">hi</p><div id="ed" contenteditable="true"><p>one</p><p>two</p></div></body>"#;

    fn mapper() -> TextMapper<MemTree, MemSelection<NodeId>> {
        let tree = MemTree::parse_xhtml(DOC).unwrap();
        TextMapper::new(tree, MemSelection::new())
    }

    #[test]
    fn test_source() {
        let m = mapper();
        let two = m.tree().find_text("two").unwrap();
        assert_eq!(m.source(&two).as_deref(), Some("one\ntwo"));
        let stat = m.tree().find_by_id("static").unwrap();
        assert_eq!(m.source(&stat), None);
    }

    #[test]
    fn test_cursor_without_selection() {
        assert_eq!(mapper().cursor(), 0);
    }

    #[test]
    fn test_cursor_outside_editable() {
        let mut m = mapper();
        let hi = m.tree().find_text("hi").unwrap();
        m.selection_mut().add_range(TreePosition::new(hi, 1), TreePosition::new(hi, 1));
        assert_eq!(m.cursor(), 0);
    }

    #[test]
    fn test_set_cursor_then_cursor() {
        let mut m = mapper();
        let one = m.tree().find_text("one").unwrap();
        m.selection_mut().set_focus(Some(one));
        m.set_cursor(5, None).unwrap();
        let two = m.tree().find_text("two").unwrap();
        assert_eq!(m.selection().active_boundary(), Some(TreePosition::new(two, 1)));
        assert_eq!(m.cursor(), 5);
        assert_eq!(m.selection().installs(), 1);
    }

    #[test]
    fn test_set_cursor_range() {
        let mut m = mapper();
        let ed = m.tree().find_by_id("ed").unwrap();
        let located = m.set_cursor_in(&ed, 2, Some(5)).unwrap();
        let one = m.tree().find_text("one").unwrap();
        let two = m.tree().find_text("two").unwrap();
        assert_eq!(
            m.selection().ranges(),
            &[(TreePosition::new(one, 2), TreePosition::new(two, 1))]
        );
        assert!(!located.is_collapsed());
    }

    #[test]
    fn test_set_cursor_without_focus_is_noop() {
        let mut m = mapper();
        m.set_cursor(3, None).unwrap();
        assert_eq!(m.selection().installs(), 0);
        assert!(m.selection().ranges().is_empty());
    }

    #[test]
    fn test_set_cursor_propagates_platform_error() {
        let mut m = mapper();
        let ed = m.tree().find_by_id("ed").unwrap();
        m.selection_mut().set_focus(Some(ed));
        m.selection_mut().fail_installs("selection unavailable");
        let err = m.set_cursor(1, None).unwrap_err();
        assert_eq!(err.to_string(), "selection unavailable");
    }

    #[test]
    fn test_focused_source() {
        let mut m = mapper();
        assert_eq!(m.focused_source(), None);
        let ed = m.tree().find_by_id("ed").unwrap();
        m.selection_mut().set_focus(Some(ed));
        assert_eq!(m.focused_source().as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn test_reads_tree_after_mutation() {
        let mut m = mapper();
        let one = m.tree().find_text("one").unwrap();
        m.selection_mut().set_focus(Some(one));
        m.set_cursor(5, None).unwrap();
        assert_eq!(m.cursor(), 5);

        // Nothing is cached: the next calls see the edited text.
        m.tree_mut().set_text(one, "first");
        assert_eq!(m.focused_source().as_deref(), Some("first\ntwo"));
        assert_eq!(m.cursor(), 7);

        let (tree, selection) = m.into_parts();
        assert_eq!(tree.find_text("first"), Some(one));
        assert_eq!(selection.installs(), 1);
    }
}
