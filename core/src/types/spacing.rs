use crate::error::{CtSlabError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// In-plane pixel spacing in millimeters (row, column)
///
/// Represents the physical distance between adjacent pixel centers,
/// row spacing along Y and column spacing along X, measured in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    pub row: f64,
    pub col: f64,
}

impl PixelSpacing {
    /// Creates a new PixelSpacing
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Parses pixel spacing from a DICOM decimal string
    ///
    /// The first value is the row spacing, the second the column spacing,
    /// per the PixelSpacing (0028,0030) convention. Accepts formats like:
    /// - "0.703125\\0.703125"
    /// - "0.7 0.7"
    /// - "[0.7, 0.7]"
    /// - Exponential notation: "7.0e-1 7.0e-1"
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two numbers can be extracted
    pub fn parse(s: &str) -> Result<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
        });

        let mut numbers = re.find_iter(s).map(|m| m.as_str());
        let row_str = numbers
            .next()
            .ok_or_else(|| format!("Failed to parse PixelSpacing from '{}'", s))?;
        let col_str = numbers
            .next()
            .ok_or_else(|| format!("Failed to parse PixelSpacing from '{}'", s))?;

        let row: f64 = row_str
            .parse()
            .map_err(|e| CtSlabError::InvalidValue(format!("Failed to parse row spacing: {}", e)))?;

        let col: f64 = col_str
            .parse()
            .map_err(|e| CtSlabError::InvalidValue(format!("Failed to parse col spacing: {}", e)))?;

        Ok(PixelSpacing { row, col })
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.row, self.col)
    }
}

/// Spacing attributes of the representative (first) slice of a series
///
/// All fields are optional: a slice may carry any subset of them. The
/// values are assumed constant across the series and are not verified
/// against the remaining slices, matching common CT series practice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpacingMetadata {
    /// PixelSpacing (0028,0030), row then column, in mm
    pub pixel_spacing: Option<PixelSpacing>,

    /// SliceThickness (0018,0050) in mm
    pub slice_thickness_mm: Option<f64>,

    /// SpacingBetweenSlices (0018,0088) in mm
    pub spacing_between_slices_mm: Option<f64>,
}

impl SpacingMetadata {
    /// Resolves the physical spacing triple used for volume export
    ///
    /// The slice (Z) spacing prefers SliceThickness and falls back to
    /// SpacingBetweenSlices when thickness is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CtSlabError::SpacingUnavailable`] when pixel spacing is
    /// missing, or when neither Z spacing attribute is present. Spacing is
    /// never silently assumed to be 1 mm.
    pub fn volume_spacing(&self) -> Result<VolumeSpacing> {
        let pixel = self.pixel_spacing.ok_or(CtSlabError::SpacingUnavailable)?;
        let slice_mm = self
            .slice_thickness_mm
            .or(self.spacing_between_slices_mm)
            .ok_or(CtSlabError::SpacingUnavailable)?;

        Ok(VolumeSpacing {
            column_mm: pixel.col,
            row_mm: pixel.row,
            slice_mm,
        })
    }
}

/// Physical spacing of an exported volume, in volume-format axis order
///
/// Component order is (column, row, slice): the X/Y order is deliberately
/// the reverse of the array's (row, column) storage layout, matching the
/// spacing-tuple convention of volumetric file formats.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct VolumeSpacing {
    /// Column (X) spacing in mm
    pub column_mm: f64,
    /// Row (Y) spacing in mm
    pub row_mm: f64,
    /// Slice (Z) spacing in mm
    pub slice_mm: f64,
}

impl fmt::Display for VolumeSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} x {} mm",
            self.column_mm, self.row_mm, self.slice_mm
        )
    }
}
