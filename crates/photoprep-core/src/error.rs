//! Error taxonomy for the editing session.
//!
//! Each failure kind stays distinct all the way to the host so a failed
//! decode, crop start, encode, validation or batch can be reported with its
//! own message. Nothing here is ever downgraded to a silent success.

use thiserror::Error;

use crate::crop::CropError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::preset::PresetStoreError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Input rejected before any work was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Presets need a non-blank name
    #[error("Preset name must not be empty")]
    EmptyPresetName,

    /// Rotation values must be whole quarter turns
    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    RotationNotQuarterTurn(i32),

    /// Flip values are scale signs
    #[error("Flip value must be 1 or -1, got {0}")]
    InvalidFlip(i8),

    /// A session needs at least one image
    #[error("Working set is empty")]
    EmptyWorkingSet,

    /// JPEG quality outside 1-100
    #[error("Quality must be between 1 and 100, got {0}")]
    QualityOutOfRange(u8),
}

/// Errors surfaced by session and pipeline operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Source image unreadable or its dimensions never resolved
    #[error("Could not decode image: {0}")]
    Decode(#[from] DecodeError),

    /// The crop tool could not attach to the image
    #[error("Could not start crop tool: {0}")]
    CropInit(#[source] CropError),

    /// The crop tool failed while active
    #[error("Crop failed: {0}")]
    Crop(#[source] CropError),

    /// Compression produced no usable output
    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),

    /// Input rejected up front
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The first failure of an apply-to-all run; later slots were not attempted
    #[error("Apply to all aborted at image {}: {source}", .slot + 1)]
    BatchAbort {
        /// Slot that failed
        slot: usize,
        /// What went wrong on that slot
        #[source]
        source: Box<EditorError>,
    },

    /// The preset store rejected a request
    #[error("Preset store error: {0}")]
    PresetStore(#[from] PresetStoreError),

    /// Commit, batch and navigation-sensitive operations are blocked while cropping
    #[error("Finish or cancel the crop first")]
    CropActive,

    /// A crop operation was requested with no crop in progress
    #[error("No crop in progress")]
    NoCropSession,

    /// Apply-to-all needs pending edits and more than one image
    #[error("Nothing to apply: {0}")]
    NothingToApply(&'static str),
}

impl EditorError {
    /// Short, stable identifier for the failure kind (used by hosts to pick a message).
    pub fn kind(&self) -> &'static str {
        match self {
            EditorError::Decode(_) => "decode",
            EditorError::CropInit(_) => "crop_init",
            EditorError::Crop(_) => "crop",
            EditorError::Encode(_) => "encode",
            EditorError::Validation(_) => "validation",
            EditorError::BatchAbort { .. } => "batch_abort",
            EditorError::PresetStore(_) => "preset_store",
            EditorError::CropActive => "crop_active",
            EditorError::NoCropSession => "no_crop_session",
            EditorError::NothingToApply(_) => "nothing_to_apply",
        }
    }
}
