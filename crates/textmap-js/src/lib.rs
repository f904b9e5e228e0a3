//! WASM bindings for textmap.
//!
//! Exposes the three mapping primitives (`getSource`, `getCursor`,
//! `setCursor`) and the compound edits built on them to the JavaScript side
//! of a controller.

mod actions;
mod mapper;
mod types;

pub use actions::*;
pub use mapper::*;
pub use types::*;

use tracing::Level;
use tracing::subscriber::set_global_default;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let filter = EnvFilter::new("info,textmap=debug");
    let reg = Registry::default().with(filter).with(wasm_layer);

    let _ = set_global_default(reg);
}
