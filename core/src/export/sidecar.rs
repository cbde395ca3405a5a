//! JSON sidecar metadata persisted between pipeline runs.
//!
//! Two small documents let the slab-extraction step run without
//! re-deriving its inputs: the series' physical spacing, and the chosen
//! center slice with its Z position.

use crate::error::Result;
use crate::types::{PixelSpacing, SpacingMetadata};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Persisted spacing metadata of a series, in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingSidecar {
    pub pixel_spacing: Option<PixelSpacingRecord>,
    pub slice_thickness_mm: Option<f64>,
    pub spacing_between_slices_mm: Option<f64>,
    pub units: String,
    pub notes: Vec<String>,
}

/// In-plane spacing entry of the spacing sidecar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelSpacingRecord {
    pub row_spacing_mm: f64,
    pub column_spacing_mm: f64,
    /// Storage-order reminder for readers of the raw JSON
    pub order: String,
}

impl SpacingSidecar {
    /// Builds the sidecar from the representative slice's metadata
    pub fn from_metadata(metadata: &SpacingMetadata) -> Self {
        let mut notes = Vec::new();
        if metadata.pixel_spacing.is_none() {
            notes.push("pixel spacing unavailable; physical-unit output disabled".to_string());
        }

        Self {
            pixel_spacing: metadata.pixel_spacing.map(|ps| PixelSpacingRecord {
                row_spacing_mm: ps.row,
                column_spacing_mm: ps.col,
                order: "[row(y), column(x)]".to_string(),
            }),
            slice_thickness_mm: metadata.slice_thickness_mm,
            spacing_between_slices_mm: metadata.spacing_between_slices_mm,
            units: "mm".to_string(),
            notes,
        }
    }

    /// Reconstructs spacing metadata for downstream use
    pub fn to_metadata(&self) -> SpacingMetadata {
        SpacingMetadata {
            pixel_spacing: self
                .pixel_spacing
                .as_ref()
                .map(|ps| PixelSpacing::new(ps.row_spacing_mm, ps.column_spacing_mm)),
            slice_thickness_mm: self.slice_thickness_mm,
            spacing_between_slices_mm: self.spacing_between_slices_mm,
        }
    }

    /// Saves as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Loads a previously saved spacing sidecar
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// Persisted choice of center slice for slab extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterSliceSidecar {
    /// Directory the series was assembled from
    pub dicom_dir: PathBuf,

    /// Index of the chosen slice in anatomical order
    pub slice_index: usize,

    /// Z position of the chosen slice in mm, when geometry was present
    pub z_mm: Option<f64>,
}

impl CenterSliceSidecar {
    /// Saves as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Loads a previously saved center-slice sidecar
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
