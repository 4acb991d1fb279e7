//! Shadow pass: luminance-selective darken/lighten.
//!
//! Pixels at or above a fixed luma threshold are left alone. Below it, the
//! effect is weighted by how dark the pixel is, so deep shadows move the most.
//!
//! ```text
//! weight     = 1 - luma / 140
//! adjustment = shadows / 100
//! darken:  c = max(0,   c * (1 + adjustment * weight * 1.5))
//! lighten: c = min(255, c + adjustment * weight * 150)
//! ```
//!
//! The threshold and both multipliers are tuning constants and must stay as-is
//! for outputs to match previously exported photos.

use crate::decode::CHANNELS;
use crate::luminance::luma;

/// Pixels with luma at or above this value are never touched.
pub const SHADOW_THRESHOLD: f64 = 140.0;

/// Scale applied to the darkening factor.
pub const DARKEN_STRENGTH: f64 = 1.5;

/// Maximum additive lift, in channel units, at full weight and `shadows = 100`.
pub const LIGHTEN_STRENGTH: f64 = 150.0;

/// Run the shadow pass over an RGBA buffer in place.
///
/// No-op when `shadows == 0`. Only the first `width * height` pixels are
/// visited; alpha is never modified.
pub fn apply_shadow(pixels: &mut [u8], width: u32, height: u32, shadows: i32) {
    if shadows == 0 {
        return;
    }

    let adjustment = shadows.clamp(-100, 100) as f64 / 100.0;
    let pixel_count = width as usize * height as usize;

    for px in pixels.chunks_exact_mut(CHANNELS).take(pixel_count) {
        let lum = luma(px[0], px[1], px[2]);
        if lum >= SHADOW_THRESHOLD {
            continue;
        }
        let weight = 1.0 - lum / SHADOW_THRESHOLD;

        if adjustment < 0.0 {
            let factor = 1.0 + adjustment * weight * DARKEN_STRENGTH;
            for c in &mut px[..3] {
                *c = to_channel(*c as f64 * factor);
            }
        } else {
            let amount = adjustment * weight * LIGHTEN_STRENGTH;
            for c in &mut px[..3] {
                *c = to_channel(*c as f64 + amount);
            }
        }
    }
}

/// Store a channel value the way a clamped byte array does: clamp, then round half to even.
#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Vec<u8> {
        vec![v, v, v, 255]
    }

    #[test]
    fn test_zero_is_noop() {
        let mut px = vec![10, 20, 30, 255, 200, 100, 0, 128];
        let before = px.clone();
        apply_shadow(&mut px, 2, 1, 0);
        assert_eq!(px, before);
    }

    #[test]
    fn test_full_darken_deep_shadow() {
        // 50 * (1 - (1 - 50/140) * 1.5) = 1.7857... -> 2
        let mut px = gray(50);
        apply_shadow(&mut px, 1, 1, -100);
        assert_eq!(px, vec![2, 2, 2, 255]);
    }

    #[test]
    fn test_darken_near_threshold_is_gentle() {
        // weight = 1/14, factor = 1 - 1.5/14, 130 * factor = 116.07 -> 116
        let mut px = gray(130);
        apply_shadow(&mut px, 1, 1, -100);
        assert_eq!(px, vec![116, 116, 116, 255]);
    }

    #[test]
    fn test_darken_clamps_at_zero() {
        // weight ~0.93, factor = 1 - 1.39 < 0
        let mut px = gray(10);
        apply_shadow(&mut px, 1, 1, -100);
        assert_eq!(px, vec![0, 0, 0, 255]);
    }

    #[test]
    fn test_lighten_adds_weighted_amount() {
        // weight = 1 - 28/140 = 0.8, amount = 0.5 * 0.8 * 150 = 60
        let mut px = gray(28);
        apply_shadow(&mut px, 1, 1, 50);
        assert_eq!(px, vec![88, 88, 88, 255]);
    }

    #[test]
    fn test_lighten_clamps_at_255() {
        let mut px = vec![255, 0, 0, 255]; // luma 76.2
        apply_shadow(&mut px, 1, 1, 100);
        assert_eq!(px[0], 255);
        assert!(px[1] > 0);
    }

    #[test]
    fn test_at_threshold_unchanged() {
        let mut px = gray(140);
        apply_shadow(&mut px, 1, 1, -100);
        assert_eq!(px, gray(140));

        apply_shadow(&mut px, 1, 1, 100);
        assert_eq!(px, gray(140));
    }

    #[test]
    fn test_alpha_untouched() {
        let mut px = vec![40, 40, 40, 17];
        apply_shadow(&mut px, 1, 1, 80);
        assert_eq!(px[3], 17);
    }

    #[test]
    fn test_only_declared_area_is_processed() {
        let mut px = [gray(50), gray(50)].concat();
        apply_shadow(&mut px, 1, 1, -100);
        assert_eq!(&px[0..4], &[2, 2, 2, 255]);
        assert_eq!(&px[4..8], &[50, 50, 50, 255]);
    }

    #[test]
    fn test_darker_pixels_move_more() {
        let mut dark = gray(50);
        let mut mid = gray(130);
        apply_shadow(&mut dark, 1, 1, -100);
        apply_shadow(&mut mid, 1, 1, -100);

        assert!(50 - dark[0] as i32 > 130 - mid[0] as i32);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: pixels at or above the threshold are unchanged for any value.
        #[test]
        fn prop_bright_pixels_unchanged(
            rgb in prop::array::uniform3(any::<u8>()),
            shadows in -100i32..=100,
        ) {
            prop_assume!(luma(rgb[0], rgb[1], rgb[2]) >= SHADOW_THRESHOLD);
            let mut px = vec![rgb[0], rgb[1], rgb[2], 255];
            apply_shadow(&mut px, 1, 1, shadows);
            prop_assert_eq!(px, vec![rgb[0], rgb[1], rgb[2], 255]);
        }

        /// Property: negative values never brighten, positive values never darken.
        #[test]
        fn prop_direction_respected(
            rgb in prop::array::uniform3(any::<u8>()),
            shadows in 1i32..=100,
        ) {
            let mut darker = vec![rgb[0], rgb[1], rgb[2], 255];
            let mut lighter = darker.clone();
            apply_shadow(&mut darker, 1, 1, -shadows);
            apply_shadow(&mut lighter, 1, 1, shadows);

            for i in 0..3 {
                prop_assert!(darker[i] <= rgb[i]);
                prop_assert!(lighter[i] >= rgb[i]);
            }
        }

        /// Property: the pass is deterministic.
        #[test]
        fn prop_deterministic(
            pixels in prop::collection::vec(any::<u8>(), 64..=64),
            shadows in -100i32..=100,
        ) {
            let mut a = pixels.clone();
            let mut b = pixels;
            apply_shadow(&mut a, 4, 4, shadows);
            apply_shadow(&mut b, 4, 4, shadows);
            prop_assert_eq!(a, b);
        }
    }
}
