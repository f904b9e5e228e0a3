//! Browser DOM host for textmap.
//!
//! Implements the core's tree, selection and input capabilities over
//! `web-sys`, and routes plain `<input>`/`<textarea>` fields around the tree
//! mapping. Assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `DocumentTree` over live DOM nodes
//! - `selection`: `SelectionPort` over `window.getSelection()`
//! - `input`: keystroke simulation through `document.execCommand`
//! - `field`: value / selectionStart handling for form fields
//! - `controller`: picks the focused target and runs the three primitives
//!   and the compound edits against it
//!
//! # Re-exports
//!
//! This crate re-exports `textmap-core` for convenience, so consumers only
//! need to depend on `textmap-browser`.

pub use textmap_core;
pub use textmap_core::*;

pub mod controller;
pub mod dom;
pub mod field;
pub mod input;
pub mod selection;

pub use controller::{BrowserController, EditTarget};
pub use dom::DomTree;
pub use field::FieldElement;
pub use input::DomInput;
pub use selection::DomSelection;

pub(crate) fn window() -> Result<web_sys::Window, PlatformError> {
    web_sys::window().ok_or_else(|| "no window".into())
}

pub(crate) fn document() -> Result<web_sys::Document, PlatformError> {
    window()?.document().ok_or_else(|| "no document".into())
}
