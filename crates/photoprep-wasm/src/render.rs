//! Render pipeline WASM bindings.
//!
//! Stateless entry points for hosts that drive rendering themselves, e.g.
//! live previews outside a session.

use crate::types::{editor_error, JsRenderOutput};
use photoprep_core::{FilterState, TransformState};
use wasm_bindgen::prelude::*;

/// Render encoded bytes with the given edits into a JPEG.
///
/// `filters` and `transform` are plain objects matching the preset shape:
/// `{ brightness, contrast, saturate, shadows }` and
/// `{ rotate, flipX, flipY }`. Missing fields take their identity value.
#[wasm_bindgen]
pub fn render_image(
    bytes: &[u8],
    filters: JsValue,
    transform: JsValue,
    quality: u8,
) -> Result<JsRenderOutput, JsValue> {
    let filters: FilterState = serde_wasm_bindgen::from_value(filters)?;
    let transform: TransformState = serde_wasm_bindgen::from_value(transform)?;
    photoprep_core::render(bytes, &filters.clamped(), &transform, quality)
        .map(JsRenderOutput::from)
        .map_err(editor_error)
}

/// Run the shadow pass in place over an RGBA buffer.
#[wasm_bindgen]
pub fn apply_shadow(pixels: &mut [u8], width: u32, height: u32, shadows: i32) {
    photoprep_core::apply_shadow(pixels, width, height, shadows);
}

/// Output `[width, height]` after a rotation.
#[wasm_bindgen]
pub fn output_dimensions(width: u32, height: u32, rotate: i32) -> Vec<u32> {
    let (w, h) = photoprep_core::output_dimensions(width, height, rotate);
    vec![w, h]
}
