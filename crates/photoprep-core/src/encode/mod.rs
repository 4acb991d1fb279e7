//! Output encoding.
//!
//! This module is the output half of the raster I/O boundary: it turns the
//! RGBA surface produced by the render pipeline or the crop tool into a
//! compressed JPEG byte stream.
//!
//! # Examples
//!
//! ```ignore
//! use photoprep_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray, opaque-ish
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
