//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGBA pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsDecodedImage to JPEG bytes

use crate::types::{js_error, JsDecodedImage};
use photoprep_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to JPEG bytes.
///
/// Transparent pixels are composited over black first.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100; the editor uses 90 for commits, 95 for crops)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - The encoder fails or produces no bytes
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

/// Encode a decoded image to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let (pixels, width, height) = image.raw_parts();
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}
