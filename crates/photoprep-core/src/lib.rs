//! Photoprep Core - listing photo editing pipeline
//!
//! This crate prepares item photographs before they are attached to
//! marketplace listings: tonal filters, quarter-turn transforms, cropping,
//! and replaying one edit across every photo of an item.
//!
//! # Module Structure
//!
//! - `shadow` - Luminance-threshold shadow pass over an RGBA buffer
//! - `filters` - Brightness/contrast/saturate percentage filters
//! - `transform` - Output sizing and exact quarter-turn/flip compositing, pixel crop
//! - `render` - Decode → transform+filter → shadow → encode
//! - `crop` - Crop tool lifecycle and aspect-ratio presets
//! - `history` - Per-(item, slot) memory of committed edits
//! - `preset` - Named filter/transform bundles and the store contract
//! - `session` - The editing session state machine

pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filters;
pub mod history;
pub mod luminance;
pub mod preset;
pub mod render;
pub mod session;
pub mod shadow;
pub mod transform;
pub mod working_set;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EditorConfig;
pub use crop::{AspectRatio, CropTool, RectCropTool};
pub use error::{EditorError, Result, ValidationError};
pub use history::{EditHistory, HistoryEntry};
pub use preset::{InMemoryPresetStore, Preset, PresetSettings, PresetStore};
pub use render::{render, RenderOutput};
pub use session::{BatchOutput, CommitOutput, Direction, EditMode, EditSession};
pub use shadow::apply_shadow;
pub use transform::{output_dimensions, CompositePlan, CropRect};
pub use working_set::{ImageOrigin, ImageRef};

use serde::{Deserialize, Serialize};

/// One of the four independently adjustable tonal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterName {
    /// Brightness percentage (0 to 200, identity 100)
    Brightness,
    /// Contrast percentage (0 to 200, identity 100)
    Contrast,
    /// Saturation percentage (0 to 200, identity 100)
    Saturate,
    /// Shadow lift/crush (-100 to 100, identity 0)
    Shadows,
}

impl FilterName {
    /// All filters in slider order.
    pub const ALL: [FilterName; 4] = [
        FilterName::Brightness,
        FilterName::Contrast,
        FilterName::Saturate,
        FilterName::Shadows,
    ];

    /// Inclusive value range accepted for this filter.
    pub fn range(self) -> (i32, i32) {
        match self {
            FilterName::Shadows => (-100, 100),
            _ => (0, 200),
        }
    }

    /// Name as used in preset settings and the WASM bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterName::Brightness => "brightness",
            FilterName::Contrast => "contrast",
            FilterName::Saturate => "saturate",
            FilterName::Shadows => "shadows",
        }
    }

    /// Parse a filter name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
    }
}

/// Tonal filter values for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Brightness percentage (0 to 200)
    pub brightness: i32,
    /// Contrast percentage (0 to 200)
    pub contrast: i32,
    /// Saturation percentage (0 to 200)
    pub saturate: i32,
    /// Shadows (-100 to 100)
    pub shadows: i32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FilterState {
    /// Values that leave the image untouched.
    pub const IDENTITY: FilterState = FilterState {
        brightness: 100,
        contrast: 100,
        saturate: 100,
        shadows: 0,
    };

    /// Check if all values are at their identity defaults
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when only the percentage filters are at identity.
    pub fn is_tonal_identity(&self) -> bool {
        self.brightness == 100 && self.contrast == 100 && self.saturate == 100
    }

    /// Read a single filter value.
    pub fn get(&self, name: FilterName) -> i32 {
        match name {
            FilterName::Brightness => self.brightness,
            FilterName::Contrast => self.contrast,
            FilterName::Saturate => self.saturate,
            FilterName::Shadows => self.shadows,
        }
    }

    /// Set a single filter value, clamped to its range.
    pub fn set(&mut self, name: FilterName, value: i32) {
        let (min, max) = name.range();
        let value = value.clamp(min, max);
        match name {
            FilterName::Brightness => self.brightness = value,
            FilterName::Contrast => self.contrast = value,
            FilterName::Saturate => self.saturate = value,
            FilterName::Shadows => self.shadows = value,
        }
    }

    /// Copy with every value clamped to its range.
    pub fn clamped(mut self) -> Self {
        for name in FilterName::ALL {
            self.set(name, self.get(name));
        }
        self
    }
}

/// A single geometric edit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformOp {
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Rotate 90° clockwise
    RotateRight,
    /// Mirror horizontally
    FlipX,
    /// Mirror vertically
    FlipY,
}

impl TransformOp {
    /// Parse an operation name as sent by the host (`rotateLeft`, `flipX`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotateLeft" | "rotate_left" => Some(TransformOp::RotateLeft),
            "rotateRight" | "rotate_right" => Some(TransformOp::RotateRight),
            "flipX" | "flip_x" => Some(TransformOp::FlipX),
            "flipY" | "flip_y" => Some(TransformOp::FlipY),
            _ => None,
        }
    }
}

/// Rotation and flip state for one image.
///
/// `rotate` accumulates without wrapping; it is only normalized when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformState {
    /// Rotation in degrees, clockwise, always a multiple of 90
    pub rotate: i32,
    /// Horizontal scale sign (1 or -1)
    #[serde(rename = "flipX")]
    pub flip_x: i8,
    /// Vertical scale sign (1 or -1)
    #[serde(rename = "flipY")]
    pub flip_y: i8,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// No rotation, no flips.
    pub const IDENTITY: TransformState = TransformState {
        rotate: 0,
        flip_x: 1,
        flip_y: 1,
    };

    /// Apply one operation in place.
    ///
    /// Near the ends of the `i32` range the angle restarts from its
    /// normalized value, which renders identically.
    pub fn apply(&mut self, op: TransformOp) {
        match op {
            TransformOp::RotateLeft => self.rotate = self.turned(-90),
            TransformOp::RotateRight => self.rotate = self.turned(90),
            TransformOp::FlipX => self.flip_x = -self.flip_x,
            TransformOp::FlipY => self.flip_y = -self.flip_y,
        }
    }

    fn turned(&self, degrees: i32) -> i32 {
        self.rotate
            .checked_add(degrees)
            .unwrap_or(self.normalized_rotation() + degrees)
    }

    /// Reject values the compositor cannot draw exactly.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.rotate % 90 != 0 {
            return Err(ValidationError::RotationNotQuarterTurn(self.rotate));
        }
        for flip in [self.flip_x, self.flip_y] {
            if flip != 1 && flip != -1 {
                return Err(ValidationError::InvalidFlip(flip));
            }
        }
        Ok(())
    }

    /// Rotation wrapped into `0..360`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotate.rem_euclid(360)
    }

    /// True when rendering would not move any pixel.
    pub fn is_identity(&self) -> bool {
        self.normalized_rotation() == 0 && self.flip_x == 1 && self.flip_y == 1
    }
}
