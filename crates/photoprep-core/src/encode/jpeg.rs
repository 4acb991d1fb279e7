//! JPEG encoding for committed edits and crop extraction.
//!
//! A canvas exported as JPEG has no alpha channel; translucent pixels are
//! composited over black first, which is what this encoder reproduces.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::CHANNELS;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder returned without producing any bytes
    #[error("JPEG encoder produced no output")]
    EmptyOutput,
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); commits use 90, crop extraction 95
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let rgb = flatten_over_black(pixels);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }
    log::debug!("encoded {width}x{height} at q{quality}: {} bytes", bytes.len());
    Ok(bytes)
}

/// Drop the alpha channel, premultiplying each colour over a black backdrop.
fn flatten_over_black(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / CHANNELS * 3);
    for px in pixels.chunks_exact(CHANNELS) {
        let alpha = px[3] as u32;
        if alpha == 255 {
            rgb.extend_from_slice(&px[..3]);
        } else {
            rgb.extend(px[..3].iter().map(|&c| ((c as u32 * alpha + 127) / 255) as u8));
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];

        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 4];

        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_rgb_sized_buffer_rejected() {
        // A 3-channel buffer is a caller bug, not something to reinterpret
        let pixels = vec![128u8; 100 * 100 * 3];

        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 40000,
                actual: 30000
            })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_flatten_over_black() {
        let rgb = flatten_over_black(&[200, 100, 50, 255, 200, 100, 50, 0, 255, 255, 255, 128]);

        assert_eq!(&rgb[0..3], &[200, 100, 50]);
        assert_eq!(&rgb[3..6], &[0, 0, 0]);
        assert_eq!(&rgb[6..9], &[128, 128, 128]);
    }

    #[test]
    fn test_encode_decodes_back_to_same_size() {
        let pixels = vec![200u8; 37 * 11 * 4];
        let bytes = encode_jpeg(&pixels, 37, 11, 95).unwrap();

        let decoded = crate::decode::decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (37, 11));
    }
}
