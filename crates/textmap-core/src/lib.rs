//! textmap-core: maps editable document trees to perceived plain text.
//!
//! This crate provides:
//! - `DocumentTree` trait for read-only access to a host document
//! - `Classifier` - the block / manual-break / inline classification shared
//!   by both traversal directions
//! - `extract_text` / `locate_offset` / `current_offset` - the mapping engine
//! - `TextMapper` - the facade a controller talks to (`source`, `cursor`,
//!   `set_cursor` and the compound edits built on them)
//! - `MemTree`, `MemSelection`, `RecordingInput` - in-memory host for tests
//!   and non-browser embedders

pub mod classify;
pub mod config;
pub mod edit;
pub mod extract;
pub mod locate;
pub mod mapper;
pub mod mem;
pub mod platform;
pub mod text;
pub mod tree;
pub mod types;
mod walk;

#[cfg(test)]
mod tests;

pub use classify::{Classifier, NodeClass};
pub use config::{ConfigError, MapperConfig};
pub use edit::{EditAction, EditOutcome, execute_edit};
pub use extract::{Segment, SegmentKind, current_offset, extract_text, segments};
pub use locate::{Located, locate_offset};
pub use mapper::TextMapper;
pub use mem::{InputOp, MarkupError, MemSelection, MemTree, NodeId, RecordingInput};
pub use platform::{InputSimulator, PlatformError, SelectionPort};
pub use smol_str::SmolStr;
pub use text::{utf16_len, utf16_prefix};
pub use tree::{DocumentTree, NodeType, find_editable_anchor};
pub use types::{LinearRange, TreePosition};
pub use walk::BreakKind;
