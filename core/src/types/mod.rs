//! Core type definitions for CT series assembly and slab extraction
//!
//! This module provides the fundamental types used throughout the ctslab library:
//! - [`CtSlice`]: one parsed single-slice DICOM file with its geometry attributes
//! - [`CtSeries`]: the anatomically ordered sequence of slices for one study
//! - [`HuSlab`]: a Hounsfield-Unit sub-volume cut around a center slice
//! - [`PixelSpacing`]: in-plane physical spacing in millimeters
//! - [`SpacingMetadata`]: spacing attributes of the representative slice
//! - [`VolumeSpacing`]: resolved (column, row, slice) spacing for volume export

mod series;
mod slab;
mod slice;
mod spacing;

pub use series::CtSeries;
pub use slab::HuSlab;
pub use slice::CtSlice;
pub use spacing::{PixelSpacing, SpacingMetadata, VolumeSpacing};
