//! Platform abstraction traits for selection and input.
//!
//! These traits define the interface between the mapping engine and the host
//! (browser DOM, in-memory fakes, native accessibility trees). The engine
//! holds no global state; the document's single active selection is only
//! ever reached through a `SelectionPort`.

use thiserror::Error;

use crate::types::TreePosition;

/// Error type for platform operations.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Accessor and mutator for the host document's active selection.
///
/// There is exactly one active selection per document and it is shared with
/// whatever the user is doing manually.
pub trait SelectionPort<N> {
    /// The selection's anchor boundary, None when nothing is selected.
    fn active_boundary(&self) -> Option<TreePosition<N>>;

    /// The node that currently has input focus.
    ///
    /// Hosts that track focus separately from the selection (the DOM's
    /// `activeElement`) should override this.
    fn focused_node(&self) -> Option<N> {
        self.active_boundary().map(|pos| pos.node)
    }

    /// Replace the selection with `start..end`, or a caret at `start`.
    ///
    /// Implementations must clear any existing ranges first so the document
    /// never ends up with a multi-range selection.
    fn install(
        &mut self,
        start: TreePosition<N>,
        end: Option<TreePosition<N>>,
    ) -> Result<(), PlatformError>;
}

/// Keystroke-level input simulation at the current caret.
///
/// The mapper only decides where the caret goes; typing and deleting are
/// left to the host so its undo stack and input events stay intact.
pub trait InputSimulator {
    /// Type `text` at the caret.
    fn insert_text(&mut self, text: &str) -> Result<(), PlatformError>;

    /// Press backspace `count` times.
    fn delete_backward(&mut self, count: usize) -> Result<(), PlatformError>;
}
