//! Output sizing and drawing for rotate/flip transforms.
//!
//! The drawing recipe mirrors a 2D canvas:
//!
//! ```text
//! translate(out_w / 2, out_h / 2)
//! scale(flip_x, flip_y)
//! rotate(rotation mod 360)
//! draw(source, -src_w / 2, -src_h / 2, src_w, src_h)
//! ```
//!
//! Because only multiples of 90° are representable, every output pixel centre
//! maps back onto exactly one source pixel centre. The inverse mapping is done
//! in doubled integer coordinates so no rounding is ever involved.

use crate::decode::{DecodedImage, CHANNELS};
use crate::TransformState;

/// True when `rotate` is an odd number of quarter turns.
#[inline]
pub fn is_quarter_turn(rotate: i32) -> bool {
    (rotate % 180).abs() == 90
}

/// Output canvas size for a source of `width x height` rotated by `rotate` degrees.
///
/// Quarter turns swap the axes; everything else keeps them.
pub fn output_dimensions(width: u32, height: u32, rotate: i32) -> (u32, u32) {
    if is_quarter_turn(rotate) {
        (height, width)
    } else {
        (width, height)
    }
}

/// Everything needed to draw one source image under a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositePlan {
    /// Source width in pixels (drawn at its original size)
    pub source_width: u32,
    /// Source height in pixels
    pub source_height: u32,
    /// Output canvas width
    pub output_width: u32,
    /// Output canvas height
    pub output_height: u32,
    /// Horizontal scale sign
    pub flip_x: i8,
    /// Vertical scale sign
    pub flip_y: i8,
    /// Rotation wrapped into `0..360`
    pub rotation_degrees: i32,
}

impl CompositePlan {
    /// Plan the draw of a `width x height` source under `transform`.
    pub fn new(width: u32, height: u32, transform: &TransformState) -> Self {
        let (output_width, output_height) = output_dimensions(width, height, transform.rotate);
        Self {
            source_width: width,
            source_height: height,
            output_width,
            output_height,
            flip_x: if transform.flip_x < 0 { -1 } else { 1 },
            flip_y: if transform.flip_y < 0 { -1 } else { 1 },
            rotation_degrees: transform.normalized_rotation(),
        }
    }

    /// Translation applied first: the output canvas centre.
    pub fn translate(&self) -> (f64, f64) {
        (
            self.output_width as f64 / 2.0,
            self.output_height as f64 / 2.0,
        )
    }

    /// Rotation applied after the flip scale, in radians.
    pub fn rotation_radians(&self) -> f64 {
        (self.rotation_degrees as f64).to_radians()
    }

    /// Top-left corner at which the source is drawn, relative to the transformed origin.
    pub fn draw_origin(&self) -> (f64, f64) {
        (
            -(self.source_width as f64) / 2.0,
            -(self.source_height as f64) / 2.0,
        )
    }

    /// True when drawing is a plain copy.
    pub fn is_identity(&self) -> bool {
        self.rotation_degrees == 0 && self.flip_x == 1 && self.flip_y == 1
    }

    /// Map an output pixel to the source pixel that lands on it.
    ///
    /// Works in doubled coordinates relative to the canvas centre: undo the
    /// translate, then the flip scale, then the rotation.
    #[inline]
    pub fn source_pixel(&self, out_x: u32, out_y: u32) -> (u32, u32) {
        let dx = 2 * out_x as i64 + 1 - self.output_width as i64;
        let dy = 2 * out_y as i64 + 1 - self.output_height as i64;

        let (fx, fy) = (dx * self.flip_x as i64, dy * self.flip_y as i64);

        // Inverse rotation, clockwise-positive in y-down coordinates
        let (sx, sy) = match self.rotation_degrees {
            90 => (fy, -fx),
            180 => (-fx, -fy),
            270 => (-fy, fx),
            _ => (fx, fy),
        };

        (
            ((sx + self.source_width as i64 - 1) / 2) as u32,
            ((sy + self.source_height as i64 - 1) / 2) as u32,
        )
    }
}

/// Draw `source` onto a fresh surface according to `plan`, passing every
/// pixel through `paint` as it is written.
///
/// `paint` is where compositing filters hook in, so transform and filtering
/// happen in a single pass over the output.
pub fn composite<F>(source: &DecodedImage, plan: &CompositePlan, paint: F) -> DecodedImage
where
    F: Fn([u8; 4]) -> [u8; 4],
{
    let mut output = DecodedImage::blank(plan.output_width, plan.output_height);
    let row_len = plan.output_width as usize * CHANNELS;

    for (out_y, row) in output.pixels.chunks_exact_mut(row_len).enumerate() {
        for (out_x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let (sx, sy) = plan.source_pixel(out_x as u32, out_y as u32);
            dst.copy_from_slice(&paint(source.pixel(sx, sy)));
        }
    }

    output
}
