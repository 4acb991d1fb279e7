//! Render pipeline: decode → transform + filters → shadow pass → encode.
//!
//! # Pipeline Order
//!
//! 1. Decode the base image to get its natural dimensions
//! 2. Allocate the output surface from the compositor's sizing and draw the
//!    source through translate/scale/rotate, applying brightness, contrast
//!    and saturate to each pixel as it is drawn
//! 3. The surface is plain row-major RGBA, so pixel addressing below is axis-aligned
//! 4. Shadow pass over the whole surface when `shadows != 0`
//! 5. JPEG encode
//!
//! Decode and encode failures are returned as errors, never as an empty success.

use crate::decode::{decode_image, DecodedImage};
use crate::encode::encode_jpeg;
use crate::error::Result;
use crate::filters::TonalFilter;
use crate::shadow::apply_shadow;
use crate::transform::{composite, CompositePlan};
use crate::{FilterState, TransformState};

/// Encoded result of a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// JPEG bytes
    pub bytes: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl RenderOutput {
    /// Size of the encoded stream.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Run steps 2-4 on an already decoded image.
pub fn render_decoded(
    image: &DecodedImage,
    filters: &FilterState,
    transform: &TransformState,
) -> DecodedImage {
    let plan = CompositePlan::new(image.width, image.height, transform);

    let mut surface = match TonalFilter::from_state(filters) {
        Some(filter) => composite(image, &plan, |px| filter.apply(px)),
        None if plan.is_identity() => image.clone(),
        None => composite(image, &plan, |px| px),
    };

    if filters.shadows != 0 {
        let (width, height) = surface.dimensions();
        apply_shadow(&mut surface.pixels, width, height, filters.shadows);
    }

    surface
}

/// Render encoded `source` bytes with the given edits and encode at `quality`.
///
/// The transform is checked before any decoding; off-axis rotations and
/// non-unit flips are validation errors.
pub fn render(
    source: &[u8],
    filters: &FilterState,
    transform: &TransformState,
    quality: u8,
) -> Result<RenderOutput> {
    transform.validate()?;
    let image = decode_image(source)?;
    let surface = render_decoded(&image, filters, transform);
    let bytes = encode_jpeg(&surface.pixels, surface.width, surface.height, quality)?;

    log::debug!(
        "rendered {}x{} -> {}x{} ({} bytes)",
        image.width,
        image.height,
        surface.width,
        surface.height,
        bytes.len()
    );

    Ok(RenderOutput {
        bytes,
        width: surface.width,
        height: surface.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use crate::test_support::{gradient, gradient_png, png_from_rgba, solid, solid_jpeg};
    use crate::{EditorError, TransformOp, ValidationError};

    fn rotated(rotate: i32) -> TransformState {
        TransformState {
            rotate,
            ..TransformState::IDENTITY
        }
    }

    #[test]
    fn test_identity_keeps_dimensions_and_pixels() {
        let bytes = solid_jpeg(32, 20, [90, 140, 200]);
        let out = render(&bytes, &FilterState::IDENTITY, &TransformState::IDENTITY, 90).unwrap();

        assert_eq!((out.width, out.height), (32, 20));
        assert_eq!(out.byte_len(), out.bytes.len());

        let decoded = decode_image(&out.bytes).unwrap();
        let [r, g, b, _] = decoded.pixel(16, 10);
        assert!((r as i32 - 90).abs() <= 4);
        assert!((g as i32 - 140).abs() <= 4);
        assert!((b as i32 - 200).abs() <= 4);
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let bytes = gradient_png(30, 12);
        let out = render(&bytes, &FilterState::IDENTITY, &rotated(90), 90).unwrap();
        assert_eq!((out.width, out.height), (12, 30));

        let decoded = decode_image(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (12, 30));
    }

    #[test]
    fn test_four_right_turns_keep_dimensions() {
        let mut transform = TransformState::IDENTITY;
        for _ in 0..4 {
            transform.apply(TransformOp::RotateRight);
        }
        let out = render(&gradient_png(30, 12), &FilterState::IDENTITY, &transform, 90).unwrap();
        assert_eq!((out.width, out.height), (30, 12));
    }

    #[test]
    fn test_filters_applied_during_draw() {
        let src = solid(2, 2, [200, 100, 50]);
        let filters = FilterState {
            brightness: 50,
            ..FilterState::IDENTITY
        };
        let out = render_decoded(&src, &filters, &rotated(90));
        assert_eq!(out.pixel(0, 0), [100, 50, 25, 255]);
    }

    #[test]
    fn test_shadow_pass_runs_after_filters() {
        // Brightness halves 100 -> 50, then shadows -100 takes 50 -> 2
        let src = solid(1, 1, [100, 100, 100]);
        let filters = FilterState {
            brightness: 50,
            shadows: -100,
            ..FilterState::IDENTITY
        };
        assert_eq!(render_decoded(&src, &filters, &TransformState::IDENTITY).pixel(0, 0), [2, 2, 2, 255]);
    }

    #[test]
    fn test_shadow_only_on_identity_transform() {
        let src = gradient(3, 3);
        let filters = FilterState {
            shadows: 60,
            ..FilterState::IDENTITY
        };
        let out = render_decoded(&src, &filters, &TransformState::IDENTITY);

        let mut expected = src.pixels.clone();
        apply_shadow(&mut expected, 3, 3, 60);
        assert_eq!(out.pixels, expected);
    }

    #[test]
    fn test_translucent_source_flattened() {
        // Left 8x8 block fully transparent white, right block opaque white
        let pixels: Vec<u8> = (0..8)
            .flat_map(|_| (0..16).flat_map(|x| [255, 255, 255, if x < 8 { 0 } else { 255 }]))
            .collect();
        let bytes = png_from_rgba(16, 8, &pixels);
        let out = render(&bytes, &FilterState::IDENTITY, &TransformState::IDENTITY, 95).unwrap();

        let decoded = decode_image(&out.bytes).unwrap();
        assert!(decoded.pixel(3, 4)[0] < 40);
        assert!(decoded.pixel(12, 4)[0] > 215);
    }

    #[test]
    fn test_off_axis_rotation_rejected() {
        let result = render(
            &gradient_png(30, 12),
            &FilterState::IDENTITY,
            &rotated(45),
            90,
        );
        assert!(matches!(
            result,
            Err(EditorError::Validation(ValidationError::RotationNotQuarterTurn(45)))
        ));
    }

    #[test]
    fn test_non_unit_flip_rejected() {
        let transform = TransformState {
            flip_x: 3,
            ..TransformState::IDENTITY
        };
        let result = render(&gradient_png(4, 4), &FilterState::IDENTITY, &transform, 90);
        assert!(matches!(
            result,
            Err(EditorError::Validation(ValidationError::InvalidFlip(3)))
        ));
    }

    #[test]
    fn test_undecodable_source_fails() {
        let result = render(b"not an image", &FilterState::IDENTITY, &TransformState::IDENTITY, 90);
        assert!(matches!(
            result,
            Err(EditorError::Decode(DecodeError::InvalidFormat))
        ));
    }
}
