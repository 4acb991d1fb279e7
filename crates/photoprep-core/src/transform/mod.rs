//! Geometric operations: quarter-turn/flip compositing and pixel cropping.
//!
//! # Transform Order
//!
//! A commit renders in this order:
//! 1. Crop (already baked into the slot's base image by the crop tool)
//! 2. Rotation + flips, with the percentage filters applied during the same draw
//! 3. Shadow pass over the composited surface
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise (y-down raster)
//! - Crop rectangles are in source pixels
//! - Origin is top-left corner

mod compose;
mod crop;

pub use compose::{composite, is_quarter_turn, output_dimensions, CompositePlan};
pub use crop::{apply_crop, CropRect};
