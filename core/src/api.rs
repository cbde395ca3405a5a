use crate::error::{CtSlabError, Result};
use crate::loading::load_series;
use crate::slab::extract_slab;
use crate::types::{CtSeries, HuSlab, SpacingMetadata};
use std::path::{Path, PathBuf};

/// One assembled CT study, ready for slab extraction
///
/// High-level facade composing directory scanning, per-file parsing and
/// anatomical ordering.
///
/// # Example
///
/// ```no_run
/// use ctslab_core::CtStudy;
///
/// let study = CtStudy::load("data/series5", false)?;
/// let slab = study.extract_slab(315, 20)?;
/// println!("slab {:?} depth {}", slab.bounds(), slab.depth());
/// # Ok::<(), ctslab_core::CtSlabError>(())
/// ```
#[derive(Debug)]
pub struct CtStudy {
    source: PathBuf,
    series: CtSeries,
}

impl CtStudy {
    /// Loads and anatomically orders the slices under `directory`
    ///
    /// Non-DICOM files are skipped; a directory with zero valid slices
    /// still loads as an empty study.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be enumerated
    pub fn load(directory: impl AsRef<Path>, recursive: bool) -> Result<Self> {
        let directory = directory.as_ref();
        let series = load_series(directory, recursive)?;
        Ok(Self {
            source: directory.to_path_buf(),
            series,
        })
    }

    /// Directory the study was assembled from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The ordered series
    pub fn series(&self) -> &CtSeries {
        &self.series
    }

    /// Number of slices in the study
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the study holds no slices
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Spacing attributes of the representative slice
    pub fn spacing_metadata(&self) -> Option<SpacingMetadata> {
        self.series.spacing_metadata()
    }

    /// Z position of the slice at `index`, when geometry is present
    ///
    /// # Errors
    ///
    /// Returns [`CtSlabError::IndexOutOfRange`] for an index outside the
    /// series
    pub fn z_position(&self, index: usize) -> Result<Option<f64>> {
        let slice = self
            .series
            .get(index)
            .ok_or(CtSlabError::IndexOutOfRange {
                index,
                len: self.series.len(),
            })?;
        Ok(slice.z_position())
    }

    /// Extracts an HU slab around `center_index`; see
    /// [`extract_slab`](crate::slab::extract_slab)
    pub fn extract_slab(&self, center_index: usize, half_window: usize) -> Result<HuSlab> {
        extract_slab(&self.series, center_index, half_window)
    }
}
