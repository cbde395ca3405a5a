//! Tissue classification by HU thresholds.
//!
//! Threshold ranges follow the body-composition literature: muscle
//! -29..150 HU, subcutaneous adipose tissue -190..-30 HU, visceral
//! adipose tissue -150..-50 HU. Ranges are inclusive on both ends.

use crate::error::{CtSlabError, Result};
use crate::types::PixelSpacing;
use ndarray::Array2;

/// Tissue compartments with established HU threshold ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TissueClass {
    /// Skeletal muscle
    Muscle,
    /// Subcutaneous adipose tissue
    Sat,
    /// Visceral adipose tissue
    Vat,
}

impl TissueClass {
    /// Inclusive HU threshold range `(low, high)` for this tissue
    pub fn hu_range(&self) -> (f32, f32) {
        match self {
            TissueClass::Muscle => (-29.0, 150.0),
            TissueClass::Sat => (-190.0, -30.0),
            TissueClass::Vat => (-150.0, -50.0),
        }
    }

    /// Lowercase name for reports
    pub fn name(&self) -> &'static str {
        match self {
            TissueClass::Muscle => "muscle",
            TissueClass::Sat => "sat",
            TissueClass::Vat => "vat",
        }
    }
}

/// Thresholds an HU image into a boolean tissue mask
pub fn tissue_mask(hu: &Array2<f32>, tissue: TissueClass) -> Array2<bool> {
    let (low, high) = tissue.hu_range();
    hu.mapv(|v| v >= low && v <= high)
}

/// Physical area of a tissue mask in mm²
///
/// # Errors
///
/// Returns [`CtSlabError::SpacingUnavailable`] when pixel spacing is not
/// provided; areas are never computed with an assumed 1 mm spacing.
pub fn tissue_area_mm2(mask: &Array2<bool>, spacing: Option<&PixelSpacing>) -> Result<f64> {
    let spacing = spacing.ok_or(CtSlabError::SpacingUnavailable)?;
    let count = mask.iter().filter(|&&v| v).count();
    Ok(count as f64 * spacing.row * spacing.col)
}
