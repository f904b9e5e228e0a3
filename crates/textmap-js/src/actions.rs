//! EditAction conversion for JavaScript.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use textmap_core::{EditAction, LinearRange};

/// JavaScript-friendly edit action, in linear offsets of the focused region.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JsEditAction {
    Insert { offset: usize, text: String },
    Delete { start: usize, end: usize },
    Replace { start: usize, end: usize, text: String },
}

impl From<JsEditAction> for EditAction {
    fn from(action: JsEditAction) -> Self {
        match action {
            JsEditAction::Insert { offset, text } => EditAction::Insert { offset, text },
            JsEditAction::Delete { start, end } => EditAction::Delete {
                range: LinearRange::new(start, end),
            },
            JsEditAction::Replace { start, end, text } => EditAction::Replace {
                range: LinearRange::new(start, end),
                text,
            },
        }
    }
}
