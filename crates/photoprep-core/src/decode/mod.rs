//! Source image decoding.
//!
//! This module is the input half of the raster I/O boundary:
//! - Guessing the container format (JPEG, PNG) from the byte stream
//! - Decoding to an RGBA8 buffer
//! - Applying EXIF orientation so natural dimensions match what a browser reports
//!
//! Everything downstream (compositor, tonal filters, shadow pass, crop) works on
//! the [`DecodedImage`] produced here and never touches encoded bytes.
//!
//! # Examples
//!
//! ```ignore
//! use photoprep_core::decode::decode_image;
//!
//! let bytes = std::fs::read("item.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod source;
mod types;

pub use source::{decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation, CHANNELS};
