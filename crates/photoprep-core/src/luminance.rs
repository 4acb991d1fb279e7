//! Luminance weights used by the pixel passes.
//!
//! Two weight sets live here:
//! - BT.601 luma (`0.299, 0.587, 0.114`) on 0-255 channel values, which the
//!   shadow pass thresholds against
//! - The CSS/SVG `feColorMatrix` saturate weights (`0.213, 0.715, 0.072`)

/// BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Red weight of the saturate colour matrix.
pub const SATURATE_R: f64 = 0.213;

/// Green weight of the saturate colour matrix.
pub const SATURATE_G: f64 = 0.715;

/// Blue weight of the saturate colour matrix.
pub const SATURATE_B: f64 = 0.072;

/// Calculate BT.601 luma from u8 RGB values.
///
/// # Returns
/// Luma on the same 0-255 scale as the inputs (not rounded)
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturate_coefficients_sum_to_one() {
        let sum = SATURATE_R + SATURATE_G + SATURATE_B;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_luma_gray_is_identity() {
        for v in [0u8, 50, 130, 140, 255] {
            assert!((luma(v, v, v) - v as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_green_dominates() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }
}
