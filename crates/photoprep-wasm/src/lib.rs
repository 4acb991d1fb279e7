//! PhotoPrep WASM - WebAssembly bindings for the listing photo editor
//!
//! This crate exposes photoprep-core to the browser host: the editing
//! session controller plus the stateless decode/render/encode helpers.
//!
//! # Module Structure
//!
//! - `session` - `JsEditSession` and the in-memory preset store
//! - `render` - One-shot render pipeline and the shadow pass
//! - `decode` / `encode` - Image codec bindings
//! - `types` - WASM-compatible wrapper types and error conversion
//!
//! Core `log` output goes to the browser console via `console_log`.
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@photoprep/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession(listingId, [bytesA, bytesB], undefined);
//! session.set_filter('brightness', 120);
//! const out = session.commit();
//! upload(out.bytes());
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod render;
mod session;
mod types;

pub use decode::{decode_image, image_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use render::{apply_shadow, output_dimensions, render_image};
pub use session::{JsEditSession, JsPresetStore};
pub use types::{JsDecodedImage, JsRenderOutput};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger not installed: {err}").into());
    }
}

/// Raise or lower console logging at runtime ("error" through "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
