//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use textmap_core::{EditOutcome, MapperConfig, SmolStr};

/// Where an edit placed the caret and where it should land afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsEditOutcome {
    pub cursor_before: usize,
    pub cursor_after: usize,
}

impl From<EditOutcome> for JsEditOutcome {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            cursor_before: outcome.cursor_before,
            cursor_after: outcome.cursor_after,
        }
    }
}

/// Mapper configuration. Every field is optional and falls back to the
/// built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsMapperConfig {
    #[tsify(optional)]
    pub block_tags: Option<Vec<String>>,
    #[tsify(optional)]
    pub break_tags: Option<Vec<String>>,
    #[tsify(optional)]
    pub editable_attribute: Option<String>,
    #[tsify(optional)]
    pub editable_values: Option<Vec<String>>,
}

fn tags(values: Vec<String>) -> Vec<SmolStr> {
    values.into_iter().map(SmolStr::from).collect()
}

impl From<JsMapperConfig> for MapperConfig {
    fn from(js: JsMapperConfig) -> Self {
        let defaults = MapperConfig::default();
        MapperConfig {
            block_tags: js.block_tags.map(tags).unwrap_or(defaults.block_tags),
            break_tags: js.break_tags.map(tags).unwrap_or(defaults.break_tags),
            editable_attribute: js
                .editable_attribute
                .map(SmolStr::from)
                .unwrap_or(defaults.editable_attribute),
            editable_values: js
                .editable_values
                .map(tags)
                .unwrap_or(defaults.editable_values),
        }
    }
}
