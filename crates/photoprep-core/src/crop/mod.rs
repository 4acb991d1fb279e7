//! Crop subsystem.
//!
//! The session talks to the crop tool only through the [`CropTool`] trait:
//! start on a decoded image, move the selection, change the aspect ratio,
//! pull the result, destroy. Any rectangle-selection implementation can sit
//! behind it; [`RectCropTool`] is the built-in one.
//!
//! # Lifecycle
//!
//! - At most one tool instance is active per session
//! - `destroy` runs before a new `start`, before switching slots and on close
//! - A crop never touches filters or transform, so it composes with tonal edits

mod aspect;
mod rect_tool;

pub use aspect::AspectRatio;
pub use rect_tool::{fit_to_aspect, RectCropTool};

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::transform::CropRect;

/// Errors raised by a crop tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// The image has no resolved dimensions yet
    #[error("Image is not ready ({width}x{height})")]
    NotReady { width: u32, height: u32 },

    /// `start` called on a tool that was never destroyed
    #[error("Crop tool is already active")]
    AlreadyActive,

    /// Operation requires a started tool
    #[error("Crop tool is not active")]
    Inactive,
}

/// Narrow lifecycle interface for an interactive rectangle selection.
pub trait CropTool {
    /// Attach to a fully decoded image with an initial aspect constraint.
    fn start(&mut self, image: DecodedImage, ratio: AspectRatio) -> Result<(), CropError>;

    /// Change the constraint; the live selection is refitted immediately.
    fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> Result<(), CropError>;

    /// Move/resize the selection. Returns the selection after constraints.
    fn select(&mut self, rect: CropRect) -> Result<CropRect, CropError>;

    /// Current selection, if active.
    fn selection(&self) -> Option<CropRect>;

    /// Current constraint, if active.
    fn aspect_ratio(&self) -> Option<AspectRatio>;

    /// Pixels under the current selection.
    fn result(&self) -> Result<DecodedImage, CropError>;

    /// Release the image and selection. Safe to call when inactive.
    fn destroy(&mut self);

    /// True between `start` and `destroy`.
    fn is_active(&self) -> bool;
}

/// Builds a fresh tool for each crop session.
pub type CropToolFactory = fn() -> Box<dyn CropTool>;

/// Factory for the built-in [`RectCropTool`].
pub fn default_crop_tool() -> Box<dyn CropTool> {
    Box::new(RectCropTool::new())
}
