//! `SelectionPort` over the DOM Selection API.
//!
//! The document has exactly one selection, shared with the user. Installing a
//! new one always goes through `removeAllRanges` first.

use web_sys::Node;

use textmap_core::{PlatformError, SelectionPort, TreePosition};

use crate::{document, window};

/// The window's selection plus `document.activeElement` for focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomSelection;

impl DomSelection {
    fn selection(&self) -> Result<web_sys::Selection, PlatformError> {
        window()?
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
            .ok_or_else(|| "no selection object".into())
    }
}

impl SelectionPort<Node> for DomSelection {
    fn active_boundary(&self) -> Option<TreePosition<Node>> {
        let selection = self.selection().ok()?;
        if selection.range_count() == 0 {
            return None;
        }
        let node = selection.anchor_node()?;
        Some(TreePosition::new(node, selection.anchor_offset() as usize))
    }

    fn focused_node(&self) -> Option<Node> {
        let active = document().ok()?.active_element()?;
        Some(active.into())
    }

    fn install(
        &mut self,
        start: TreePosition<Node>,
        end: Option<TreePosition<Node>>,
    ) -> Result<(), PlatformError> {
        let selection = self.selection()?;
        let range = document()?
            .create_range()
            .map_err(|e| format!("create_range failed: {:?}", e))?;

        range
            .set_start(&start.node, start.offset as u32)
            .map_err(|e| format!("set_start failed: {:?}", e))?;
        match &end {
            Some(end) => range
                .set_end(&end.node, end.offset as u32)
                .map_err(|e| format!("set_end failed: {:?}", e))?,
            None => range.collapse_with_to_start(true),
        }

        tracing::trace!(
            target: "textmap::selection",
            start_offset = start.offset,
            end_offset = ?end.as_ref().map(|e| e.offset),
            "replacing document selection"
        );

        selection
            .remove_all_ranges()
            .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
        selection
            .add_range(&range)
            .map_err(|e| format!("add_range failed: {:?}", e))?;

        Ok(())
    }
}
