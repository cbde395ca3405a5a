//! Spacing-aware volume export.
//!
//! Pairs a slab's voxel data with its physical spacing and writes a
//! NIfTI-1 file for the downstream segmentation model. The slab array is
//! stored (depth, height, width) but NIfTI dimensions run fastest-first,
//! so the array is permuted to (width, height, depth) before writing and
//! the spacing triple leads with the column spacing.

pub mod sidecar;

use crate::error::{CtSlabError, Result};
use crate::types::{HuSlab, VolumeSpacing};
use log::info;
use nifti::writer::WriterOptions;
use nifti::NiftiHeader;
use std::path::Path;

/// Writes the slab as a NIfTI volume with physical spacing metadata
///
/// # Errors
///
/// Writer failures (unwritable destination, invalid array) surface as
/// [`CtSlabError::Writer`] with the destination path attached; nothing is
/// retried.
pub fn export_volume(slab: &HuSlab, spacing: &VolumeSpacing, destination: &Path) -> Result<()> {
    let header = NiftiHeader {
        pixdim: [
            1.0,
            spacing.column_mm as f32,
            spacing.row_mm as f32,
            spacing.slice_mm as f32,
            1.0,
            1.0,
            1.0,
            1.0,
        ],
        ..Default::default()
    };

    // Dimensions are written in array-axis order; the column axis must
    // come first to match the pixdim binding above
    let volume = slab.data.view().permuted_axes([2, 1, 0]);

    WriterOptions::new(destination)
        .reference_header(&header)
        .write_nifti(&volume)
        .map_err(|e| CtSlabError::Writer {
            path: destination.to_path_buf(),
            message: e.to_string(),
        })?;

    let (depth, height, width) = slab.dim();
    info!(
        "Wrote {}x{}x{} volume ({}) to {}",
        width,
        height,
        depth,
        spacing,
        destination.display()
    );

    Ok(())
}
