//! Tree to text: linearize an editable region into the string a user reads.

use std::ops::Range;

use crate::classify::Classifier;
use crate::text::utf16_len;
use crate::tree::DocumentTree;
use crate::types::TreePosition;
use crate::walk::{BreakKind, Flow, LineBreak, Visitor, Walker};

struct TextCollector {
    content: String,
}

impl<N> Visitor<N> for TextCollector {
    fn text(&mut self, _node: &N, text: &str) -> Flow {
        self.content.push_str(text);
        Ok(())
    }

    fn line_break(&mut self, _brk: LineBreak<N>) -> Flow {
        self.content.push('\n');
        Ok(())
    }
}

/// Linearize `anchor`'s subtree.
///
/// With a `boundary`, the text stops at that tree position; its UTF-16
/// length is then the boundary's linear offset.
pub fn extract_text<T: DocumentTree>(
    tree: &T,
    classifier: &Classifier,
    anchor: &T::Node,
    boundary: Option<&TreePosition<T::Node>>,
) -> String {
    let mut collector = TextCollector {
        content: String::new(),
    };
    let halted = Walker::new(tree, classifier, anchor)
        .stop_at(boundary)
        .run(&mut collector);

    if boundary.is_some() && !halted {
        tracing::trace!(
            target: "textmap::extract",
            boundary = ?boundary,
            "boundary not inside anchor, returning full text"
        );
    }

    collector.content
}

/// Linear offset of an existing tree position inside `anchor`.
pub fn current_offset<T: DocumentTree>(
    tree: &T,
    classifier: &Classifier,
    anchor: &T::Node,
    boundary: &TreePosition<T::Node>,
) -> usize {
    let offset = utf16_len(&extract_text(tree, classifier, anchor, Some(boundary)));
    tracing::trace!(
        target: "textmap::extract",
        node = ?boundary.node,
        node_offset = boundary.offset,
        offset,
        "current offset"
    );
    offset
}

/// What produced a run of linear text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Break(BreakKind),
}

/// One contiguous run of the linear text and where it came from.
///
/// For text, `position` is the start of the text node. For a synthetic
/// newline it is the tree position in front of the newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<N> {
    pub kind: SegmentKind,
    pub range: Range<usize>,
    pub position: TreePosition<N>,
}

struct SegmentCollector<N> {
    seen: usize,
    segments: Vec<Segment<N>>,
}

impl<N: Clone> Visitor<N> for SegmentCollector<N> {
    fn text(&mut self, node: &N, text: &str) -> Flow {
        let len = utf16_len(text);
        self.segments.push(Segment {
            kind: SegmentKind::Text,
            range: self.seen..self.seen + len,
            position: TreePosition::new(node.clone(), 0),
        });
        self.seen += len;
        Ok(())
    }

    fn line_break(&mut self, brk: LineBreak<N>) -> Flow {
        self.segments.push(Segment {
            kind: SegmentKind::Break(brk.kind),
            range: self.seen..self.seen + 1,
            position: brk.before,
        });
        self.seen += 1;
        Ok(())
    }
}

/// The full linearization of `anchor` as a list of segments, in order.
///
/// Concatenating the segments reproduces `extract_text(.., None)`.
pub fn segments<T: DocumentTree>(
    tree: &T,
    classifier: &Classifier,
    anchor: &T::Node,
) -> Vec<Segment<T::Node>> {
    let mut collector = SegmentCollector {
        seen: 0,
        segments: Vec::new(),
    };
    Walker::new(tree, classifier, anchor).run(&mut collector);
    collector.segments
}
