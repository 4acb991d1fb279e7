//! Percentage tonal filters applied while compositing.
//!
//! These follow the CSS filter-function definitions and are chained in a
//! fixed order on normalized sRGB channels, clamping after every step:
//!
//! 1. brightness(b): `c * b`
//! 2. contrast(k): `(c - 0.5) * k + 0.5`
//! 3. saturate(s): `feColorMatrix` saturate matrix
//!
//! Alpha is never modified. The shadow pass is not part of this chain; it
//! runs afterwards over the composited surface (see [`crate::shadow`]).

use crate::luminance::{SATURATE_B, SATURATE_G, SATURATE_R};
use crate::FilterState;

/// Precomputed per-pixel form of the three percentage filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalFilter {
    brightness: f64,
    contrast: f64,
    saturate: Option<[[f64; 3]; 3]>,
}

impl TonalFilter {
    /// Build the filter chain for `filters`.
    ///
    /// Returns `None` when brightness, contrast and saturate are all at 100%,
    /// so callers can skip per-pixel work entirely.
    pub fn from_state(filters: &FilterState) -> Option<Self> {
        if filters.is_tonal_identity() {
            return None;
        }
        let saturate = (filters.saturate != 100).then(|| saturate_matrix(filters.saturate as f64 / 100.0));
        Some(Self {
            brightness: filters.brightness as f64 / 100.0,
            contrast: filters.contrast as f64 / 100.0,
            saturate,
        })
    }

    /// Filter a single RGBA pixel.
    #[inline]
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        let mut rgb = [
            px[0] as f64 / 255.0,
            px[1] as f64 / 255.0,
            px[2] as f64 / 255.0,
        ];

        if self.brightness != 1.0 {
            for c in &mut rgb {
                *c = (*c * self.brightness).clamp(0.0, 1.0);
            }
        }
        if self.contrast != 1.0 {
            for c in &mut rgb {
                *c = ((*c - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0);
            }
        }
        if let Some(m) = &self.saturate {
            let [r, g, b] = rgb;
            for (c, row) in rgb.iter_mut().zip(m) {
                *c = (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 1.0);
            }
        }

        [
            (rgb[0] * 255.0).round() as u8,
            (rgb[1] * 255.0).round() as u8,
            (rgb[2] * 255.0).round() as u8,
            px[3],
        ]
    }
}

/// The SVG `feColorMatrix type="saturate"` matrix for amount `s`.
fn saturate_matrix(s: f64) -> [[f64; 3]; 3] {
    [
        [
            SATURATE_R + (1.0 - SATURATE_R) * s,
            SATURATE_G - SATURATE_G * s,
            SATURATE_B - SATURATE_B * s,
        ],
        [
            SATURATE_R - SATURATE_R * s,
            SATURATE_G + (1.0 - SATURATE_G) * s,
            SATURATE_B - SATURATE_B * s,
        ],
        [
            SATURATE_R - SATURATE_R * s,
            SATURATE_G - SATURATE_G * s,
            SATURATE_B + (1.0 - SATURATE_B) * s,
        ],
    ]
}
