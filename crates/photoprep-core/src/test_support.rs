//! Synthetic image fixtures shared by unit tests.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::decode::DecodedImage;

/// Encode an RGBA buffer as PNG (lossless, so tests can compare exact pixels).
pub fn png_from_rgba(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .expect("png encode");
    buffer.into_inner()
}

/// PNG whose pixel at (x, y) is `[x * 40, y * 60, 100, 255]`.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    png_from_rgba(width, height, &gradient(width, height).pixels)
}

/// Decoded gradient matching [`gradient_png`].
pub fn gradient(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 40 % 256) as u8, (y * 60 % 256) as u8, 100, 255]);
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// Solid-colour opaque RGBA image.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
    let pixels = (0..width * height)
        .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
        .collect();
    DecodedImage::new(width, height, pixels)
}

/// Solid-colour JPEG at quality 95.
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let pixels: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, 95)
        .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        .expect("jpeg encode");
    buffer.into_inner()
}
