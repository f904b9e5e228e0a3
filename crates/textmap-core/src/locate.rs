//! Text to tree: find the tree positions behind linear offsets.
//!
//! Runs the same walk as extraction and counts UTF-16 units as it goes, so
//! every synthetic newline is seen exactly where extraction produced it.

use crate::classify::Classifier;
use crate::text::utf16_len;
use crate::tree::DocumentTree;
use crate::types::{LinearRange, TreePosition};
use crate::walk::{BreakKind, Flow, Halt, LineBreak, Visitor, Walker};

/// Which side of a node boundary a target prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Affinity {
    /// Prefer the start of the following node (carets, range starts).
    Forward,
    /// Prefer the end of the preceding text node (range ends).
    Backward,
}

#[derive(Debug)]
struct Target<N> {
    offset: usize,
    affinity: Affinity,
    found: Option<TreePosition<N>>,
}

impl<N> Target<N> {
    fn new(offset: usize, affinity: Affinity) -> Self {
        Self {
            offset,
            affinity,
            found: None,
        }
    }

    fn hits_text(&self, seen: usize, len: usize) -> bool {
        match self.affinity {
            Affinity::Forward => seen <= self.offset && self.offset < seen + len,
            Affinity::Backward => seen <= self.offset && self.offset <= seen + len,
        }
    }
}

struct Locator<N> {
    seen: usize,
    start: Target<N>,
    end: Option<Target<N>>,
    /// Most recent locatable point: end of the last text node, or just past
    /// the last synthetic newline. Where unresolved targets clamp to.
    last: TreePosition<N>,
    /// End of the last text node since the last newline.
    last_text_end: Option<TreePosition<N>>,
}

impl<N: Clone> Locator<N> {
    fn targets_mut(&mut self) -> impl Iterator<Item = &mut Target<N>> {
        std::iter::once(&mut self.start).chain(self.end.as_mut())
    }

    fn done(&self) -> Flow {
        let end_found = self.end.as_ref().is_none_or(|t| t.found.is_some());
        if self.start.found.is_some() && end_found {
            Err(Halt)
        } else {
            Ok(())
        }
    }
}

impl<N: Clone + std::fmt::Debug> Visitor<N> for Locator<N> {
    fn text(&mut self, node: &N, text: &str) -> Flow {
        let len = utf16_len(text);
        let seen = self.seen;
        for target in self.targets_mut() {
            if target.found.is_none() && target.hits_text(seen, len) {
                tracing::trace!(
                    target: "textmap::locate",
                    offset = target.offset,
                    ?node,
                    node_offset = target.offset - seen,
                    "resolved inside text node"
                );
                target.found = Some(TreePosition::new(node.clone(), target.offset - seen));
            }
        }
        self.seen += len;
        let end = TreePosition::new(node.clone(), len);
        self.last = end.clone();
        self.last_text_end = Some(end);
        self.done()
    }

    fn line_break(&mut self, brk: LineBreak<N>) -> Flow {
        let seen = self.seen;
        // A block newline follows text directly, so the caret stays in that
        // text. A manual break gets the point right before the break node.
        let before = match brk.kind {
            BreakKind::Block => self.last_text_end.take().unwrap_or(brk.before),
            BreakKind::Manual => brk.before,
        };
        for target in self.targets_mut() {
            if target.found.is_none() && target.offset == seen {
                tracing::trace!(
                    target: "textmap::locate",
                    offset = target.offset,
                    kind = ?brk.kind,
                    position = ?before,
                    "resolved at line break"
                );
                target.found = Some(before.clone());
            }
        }
        self.seen += 1;
        self.last = brk.after;
        self.last_text_end = None;
        self.done()
    }
}

/// Tree positions for a caret or range, plus the linear range they cover
/// after normalization and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<N> {
    pub start: TreePosition<N>,
    pub end: TreePosition<N>,
    pub range: LinearRange,
}

impl<N: PartialEq> Located<N> {
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Find the tree positions for `start` (and `end`, for a range) inside
/// `anchor`.
///
/// `end < start` is swapped. Offsets past the end of the text clamp to the
/// last position in the anchor. Pure: installing the result as the
/// document's selection is the caller's job.
pub fn locate_offset<T: DocumentTree>(
    tree: &T,
    classifier: &Classifier,
    anchor: &T::Node,
    start: usize,
    end: Option<usize>,
) -> Located<T::Node> {
    let requested = LinearRange::new(start, end.unwrap_or(start)).normalize();
    let mut locator = Locator {
        seen: 0,
        start: Target::new(requested.start, Affinity::Forward),
        end: (!requested.is_caret()).then(|| Target::new(requested.end, Affinity::Backward)),
        last: TreePosition::new(anchor.clone(), 0),
        last_text_end: None,
    };

    Walker::new(tree, classifier, anchor).run(&mut locator);

    let total = locator.seen;
    let clamp = |target: Target<T::Node>, last: &TreePosition<T::Node>| {
        target.found.unwrap_or_else(|| {
            tracing::trace!(
                target: "textmap::locate",
                offset = target.offset,
                len = total,
                "offset past end, clamping"
            );
            last.clone()
        })
    };

    // Each unresolved end collapses onto the last located point on its own;
    // a start that did resolve keeps its place.
    let range = LinearRange::new(requested.start.min(total), requested.end.min(total));
    let start_pos = clamp(locator.start, &locator.last);
    let end_pos = match locator.end {
        Some(target) => clamp(target, &locator.last),
        None => start_pos.clone(),
    };

    Located {
        start: start_pos,
        end: end_pos,
        range,
    }
}
