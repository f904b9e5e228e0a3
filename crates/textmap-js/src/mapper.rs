//! JsTextMapper - the mapping engine exposed to JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::Node;

use textmap_browser::BrowserController;
use textmap_core::{EditAction, EditOutcome, MapperConfig, PlatformError};

use crate::actions::JsEditAction;
use crate::types::{JsEditOutcome, JsMapperConfig};

fn to_js_error(e: PlatformError) -> JsError {
    JsError::new(&e.to_string())
}

fn outcome_to_js(outcome: Option<EditOutcome>) -> Option<JsEditOutcome> {
    outcome.map(JsEditOutcome::from)
}

/// Maps the focused editable region to plain text and back.
///
/// Every call reads the live document; nothing is cached between calls.
#[wasm_bindgen]
pub struct JsTextMapper {
    controller: BrowserController,
}

#[wasm_bindgen]
impl JsTextMapper {
    /// Create a mapper, optionally overriding the tag configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsMapperConfig>) -> Self {
        let config: MapperConfig = config.map(Into::into).unwrap_or_default();
        Self {
            controller: BrowserController::with_config(&config),
        }
    }

    /// Perceived text of the editable region around `node`, or of the
    /// focused one. `undefined` when nothing editable is there.
    #[wasm_bindgen(js_name = getSource)]
    pub fn get_source(&self, node: Option<Node>) -> Option<String> {
        self.controller.source(node.as_ref())
    }

    /// Caret offset in the focused region, 0 when there is none.
    #[wasm_bindgen(js_name = getCursor)]
    pub fn get_cursor(&self) -> usize {
        self.controller.cursor()
    }

    /// Place the caret at `offset`, or select `offset..end`.
    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&mut self, offset: usize, end: Option<usize>) -> Result<(), JsError> {
        self.controller.set_cursor(offset, end).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(
        &mut self,
        offset: usize,
        text: &str,
    ) -> Result<Option<JsEditOutcome>, JsError> {
        self.controller
            .insert_text(offset, text)
            .map(outcome_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = deleteRange)]
    pub fn delete_range(
        &mut self,
        start: usize,
        end: usize,
    ) -> Result<Option<JsEditOutcome>, JsError> {
        self.controller
            .delete_range(start, end)
            .map(outcome_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = replaceRange)]
    pub fn replace_range(
        &mut self,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<Option<JsEditOutcome>, JsError> {
        self.controller
            .replace_range(start, end, text)
            .map(outcome_to_js)
            .map_err(to_js_error)
    }

    /// Run an edit given as a tagged object (`{type: "insert", ...}`).
    #[wasm_bindgen(js_name = executeAction)]
    pub fn execute_action(&mut self, action: JsValue) -> Result<Option<JsEditOutcome>, JsError> {
        let action: JsEditAction = serde_wasm_bindgen::from_value(action)
            .map_err(|e| JsError::new(&format!("Invalid action: {}", e)))?;
        self.controller
            .edit(&EditAction::from(action))
            .map(outcome_to_js)
            .map_err(to_js_error)
    }
}
