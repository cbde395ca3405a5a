//! Hounsfield-Unit conversion.
//!
//! CT files store pixel values in a vendor-specific integer scale and
//! carry a per-slice linear calibration (RescaleSlope/RescaleIntercept)
//! mapping them onto the HU radiodensity scale. Per DICOM convention,
//! absent calibration attributes mean "no rescale".

use crate::error::Result;
use crate::types::CtSlice;
use ndarray::Array2;

/// Slope applied when RescaleSlope is absent
pub const DEFAULT_RESCALE_SLOPE: f32 = 1.0;

/// Intercept applied when RescaleIntercept is absent
pub const DEFAULT_RESCALE_INTERCEPT: f32 = 0.0;

/// Converts a slice's stored pixel values into Hounsfield Units
///
/// Computes `stored * slope + intercept` element-wise in single-precision
/// floating point, which avoids integer overflow on the multiply and
/// matches clinical HU resolution. The input slice is not mutated.
///
/// # Errors
///
/// Returns [`crate::CtSlabError::PixelData`] if the slice's pixel data
/// cannot be decoded
pub fn to_hu(slice: &CtSlice) -> Result<Array2<f32>> {
    let slope = slice
        .rescale_slope
        .map(|v| v as f32)
        .unwrap_or(DEFAULT_RESCALE_SLOPE);
    let intercept = slice
        .rescale_intercept
        .map(|v| v as f32)
        .unwrap_or(DEFAULT_RESCALE_INTERCEPT);

    let stored = slice.stored_pixels()?;
    Ok(stored.mapv(|v| v as f32 * slope + intercept))
}
