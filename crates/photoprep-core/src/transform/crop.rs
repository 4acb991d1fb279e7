//! Rectangular pixel cropping.
//!
//! The crop tool produces a [`CropRect`] in source pixels; this module turns
//! it into a new image. The source is never modified.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodedImage, CHANNELS};

/// A selection rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Clamp into a `width x height` image, keeping at least one pixel.
    pub fn clamped_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        let w = self.width.min(width - x).max(1);
        let h = self.height.min(height - y).max(1);
        Self::new(x, y, w, h)
    }

    /// Centre point in pixel units.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Copy the pixels under `rect` into a new image.
///
/// # Behavior
///
/// - The rectangle is clamped to the image bounds first
/// - Minimum output dimension is 1x1 pixels
/// - A full-image rectangle returns a copy of the original
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    let rect = rect.clamped_to(image.width, image.height);

    if rect == CropRect::full(image.width, image.height) {
        return image.clone();
    }

    let src_row = image.width as usize * CHANNELS;
    let dst_row = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(dst_row * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_row + rect.x as usize * CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + dst_row]);
    }

    DecodedImage::new(rect.width, rect.height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel's red channel encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &CropRect::full(100, 100));
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRect::new(2, 2, 6, 6));

        assert_eq!(result.dimensions(), (6, 6));
        // Value at (2, 2) = 2 * 10 + 2
        assert_eq!(result.pixel(0, 0), [22, 22, 22, 255]);
        assert_eq!(result.pixel(5, 5), [77, 77, 77, 255]);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRect::new(8, 8, 5, 5));

        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.pixel(0, 0)[0], 88);
    }

    #[test]
    fn test_origin_outside_image_clamps() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRect::new(50, 50, 5, 5));

        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.pixel(0, 0)[0], 99);
    }

    #[test]
    fn test_zero_sized_rect_yields_one_pixel() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRect::new(3, 4, 0, 0));
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = apply_crop(&img, &CropRect::new(0, 0, 50, 100));
        assert_eq!(result.dimensions(), (50, 100));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = CropRect::new(10, 20, 40, 20);
        assert_eq!(rect.center(), (30.0, 30.0));
        assert!((rect.aspect() - 2.0).abs() < f64::EPSILON);
    }
}
