//! WASM-compatible wrapper types for image data.
//!
//! These wrap core types and handle the conversion between Rust and
//! JavaScript data representations.

use photoprep_core::decode::DecodedImage;
use photoprep_core::{EditorError, RenderOutput};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGBA pixel data (4 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    pub(crate) fn raw_parts(&self) -> (&[u8], u32, u32) {
        (&self.pixels, self.width, self.height)
    }
}

/// Encoded JPEG produced by a render, commit or batch.
///
/// Commit and batch outputs carry the slot they belong to.
#[wasm_bindgen]
pub struct JsRenderOutput {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
    slot: Option<u32>,
}

#[wasm_bindgen]
impl JsRenderOutput {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Slot index, or `undefined` for a stateless render.
    #[wasm_bindgen(getter)]
    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    /// JPEG bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<RenderOutput> for JsRenderOutput {
    fn from(output: RenderOutput) -> Self {
        Self {
            width: output.width,
            height: output.height,
            bytes: output.bytes,
            slot: None,
        }
    }
}

impl JsRenderOutput {
    pub(crate) fn for_slot(output: RenderOutput, slot: usize) -> Self {
        Self {
            slot: Some(slot as u32),
            ..Self::from(output)
        }
    }
}

/// Host-facing error text: `"<kind>: <message>"`.
pub(crate) fn error_message(err: &EditorError) -> String {
    format!("{}: {}", err.kind(), err)
}

pub(crate) fn editor_error(err: EditorError) -> JsValue {
    JsValue::from_str(&error_message(&err))
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
