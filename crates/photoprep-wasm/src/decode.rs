//! Image decoding WASM bindings.

use crate::types::{js_error, JsDecodedImage};
use photoprep_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG/PNG bytes to RGBA pixels, honouring EXIF orientation.
///
/// # Errors
///
/// Returns an error if the format is not recognised, the data is corrupt,
/// or the image has no resolved dimensions.
///
/// # Example
///
/// ```typescript
/// const image = decode_image(new Uint8Array(await file.arrayBuffer()));
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// EXIF orientation tag (1-8) of encoded bytes; 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
