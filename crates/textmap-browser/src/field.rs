//! Plain form fields.
//!
//! `<input>` and `<textarea>` hold their text in a value, not a tree, so the
//! linear text is the value and offsets go straight to the field's own
//! selection API. Both already count in UTF-16 units.

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, Node};

use textmap_core::{PlatformError, utf16_len};

/// A text-bearing form field.
#[derive(Debug, Clone)]
pub enum FieldElement {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl FieldElement {
    /// The field `node` is, if it is one.
    pub fn from_node(node: &Node) -> Option<Self> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return Some(Self::Input(input.clone()));
        }
        node.dyn_ref::<HtmlTextAreaElement>()
            .map(|area| Self::TextArea(area.clone()))
    }

    pub fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    /// Length of the value in UTF-16 units.
    fn value_len(&self) -> usize {
        utf16_len(&self.value())
    }

    /// Caret position, None for input types without a text selection
    /// (`number`, `email` and friends throw on `selectionStart`).
    pub fn selection_start(&self) -> Option<usize> {
        let start = match self {
            Self::Input(input) => input.selection_start().ok()?,
            Self::TextArea(area) => area.selection_start().ok()?,
        };
        start.map(|s| s as usize)
    }

    /// Select `start..end` (a caret when `end` is None), clamped to the
    /// value's length. Returns the clamped range.
    pub fn set_selection(
        &self,
        start: usize,
        end: Option<usize>,
    ) -> Result<(usize, usize), PlatformError> {
        let len = self.value_len();
        let end = end.unwrap_or(start);
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        match self {
            Self::Input(input) => input.set_selection_range(start as u32, end as u32),
            Self::TextArea(area) => area.set_selection_range(start as u32, end as u32),
        }
        .map_err(|e| format!("set_selection_range failed: {:?}", e))?;
        tracing::trace!(target: "textmap::field", start, end, "field selection set");
        Ok((start, end))
    }
}
