//! Half-window slab extraction over an ordered series.

use crate::error::{CtSlabError, Result};
use crate::hu::to_hu;
use crate::types::{CtSeries, HuSlab};
use log::debug;
use ndarray::{s, Array3};

/// Extracts an HU slab of up to `2 * half_window + 1` slices centered on
/// `center_index`
///
/// The window is symmetric and inclusive on both ends:
/// `start = max(0, center - half_window)`,
/// `end = min(len - 1, center + half_window)`. Clamping at either series
/// boundary silently shrinks the window rather than failing; callers that
/// require the exact requested window must check the slab's bounds.
///
/// # Errors
///
/// - [`CtSlabError::EmptySeries`] when the series has no slices
/// - [`CtSlabError::IndexOutOfRange`] when `center_index >= len`
/// - [`CtSlabError::InconsistentDimensions`] when slices in the window
///   differ in rows/columns
/// - [`CtSlabError::PixelData`] when a slice in the window cannot be
///   decoded
pub fn extract_slab(series: &CtSeries, center_index: usize, half_window: usize) -> Result<HuSlab> {
    if series.is_empty() {
        return Err(CtSlabError::EmptySeries);
    }

    let len = series.len();
    if center_index >= len {
        return Err(CtSlabError::IndexOutOfRange {
            index: center_index,
            len,
        });
    }

    let start = center_index.saturating_sub(half_window);
    let end = center_index.saturating_add(half_window).min(len - 1);

    debug!(
        "Extracting slab {}..={} (center {}, half-window {}) from series of {}",
        start, end, center_index, half_window, len
    );

    let mut planes = Vec::with_capacity(end - start + 1);
    for slice in &series.slices()[start..=end] {
        planes.push(to_hu(slice)?);
    }

    let (height, width) = planes[0].dim();
    if planes.iter().any(|p| p.dim() != (height, width)) {
        return Err(CtSlabError::InconsistentDimensions);
    }

    let mut data = Array3::<f32>::zeros((planes.len(), height, width));
    for (i, plane) in planes.iter().enumerate() {
        data.slice_mut(s![i, .., ..]).assign(plane);
    }

    Ok(HuSlab { data, start, end })
}
