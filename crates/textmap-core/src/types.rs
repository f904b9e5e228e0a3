//! Core position types: tree positions and linear offset ranges.
//!
//! These types are host-agnostic and can be used with any `DocumentTree`.

use serde::{Deserialize, Serialize};

/// A point inside the document tree.
///
/// For a text node, `offset` is a UTF-16 index into its data. For any other
/// node it is a child index, so `(parent, i)` is the point immediately
/// before the parent's `i`th child. This is the DOM `Range` convention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePosition<N> {
    pub node: N,
    pub offset: usize,
}

impl<N> TreePosition<N> {
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Map the node handle, keeping the offset.
    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> TreePosition<M> {
        TreePosition {
            node: f(self.node),
            offset: self.offset,
        }
    }
}

/// A range of linear offsets (UTF-16 code units into the perceived text).
///
/// Callers may hand over `end < start`; use `normalize()` before relying on
/// the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearRange {
    pub start: usize,
    pub end: usize,
}

impl LinearRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Swap the ends if needed so `start <= end`.
    pub fn normalize(self) -> Self {
        Self::new(self.start.min(self.end), self.start.max(self.end))
    }
}
