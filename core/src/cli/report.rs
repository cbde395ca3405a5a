use crate::types::{HuSlab, VolumeSpacing};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Summary of one slab extraction, for text and JSON output
#[derive(Debug, Serialize)]
pub struct SlabReport {
    /// Source directory of the series
    pub source: PathBuf,

    /// Number of slices in the assembled series
    pub slice_count: usize,

    /// Requested center slice index
    pub center_index: usize,

    /// Requested half-window size
    pub half_window: usize,

    /// First series index included in the slab
    pub start: usize,

    /// Last series index included in the slab
    pub end: usize,

    /// Slab shape as (depth, height, width)
    pub shape: (usize, usize, usize),

    /// Minimum HU value in the slab
    pub hu_min: Option<f32>,

    /// Maximum HU value in the slab
    pub hu_max: Option<f32>,

    /// Resolved physical spacing, absent when unavailable
    pub spacing: Option<VolumeSpacing>,

    /// Path of the exported volume, when one was written
    pub volume_path: Option<PathBuf>,
}

impl SlabReport {
    /// Builds the report from an extracted slab
    pub fn new(
        source: PathBuf,
        slice_count: usize,
        center_index: usize,
        half_window: usize,
        slab: &HuSlab,
    ) -> Self {
        let hu_range = slab.hu_range();
        Self {
            source,
            slice_count,
            center_index,
            half_window,
            start: slab.start,
            end: slab.end,
            shape: slab.dim(),
            hu_min: hu_range.map(|(lo, _)| lo),
            hu_max: hu_range.map(|(_, hi)| hi),
            spacing: None,
            volume_path: None,
        }
    }

    /// Whether boundary clamping shrank the requested window
    pub fn window_clamped(&self) -> bool {
        let requested = 2 * self.half_window + 1;
        (self.end - self.start + 1) < requested
    }
}

/// Text report formatter for a slab extraction
pub struct TextReport<'a> {
    report: &'a SlabReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a SlabReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;

        writeln!(f, "HU Slab Extraction")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Source:       {}", r.source.display())?;
        writeln!(f, "Series size:  {} slices", r.slice_count)?;
        writeln!(
            f,
            "Requested:    center {} +/- {}",
            r.center_index, r.half_window
        )?;
        writeln!(
            f,
            "Slab indices: {}..{} (count={})",
            r.start,
            r.end,
            r.end - r.start + 1
        )?;
        if r.window_clamped() {
            writeln!(f, "              (window clamped at series boundary)")?;
        }
        let (depth, height, width) = r.shape;
        writeln!(f, "Slab shape:   ({}, {}, {})  # (Z, H, W)", depth, height, width)?;
        match (r.hu_min, r.hu_max) {
            (Some(lo), Some(hi)) => writeln!(f, "HU min/max:   {} / {}", lo, hi)?,
            _ => writeln!(f, "HU min/max:   n/a")?,
        }
        match &r.spacing {
            Some(spacing) => writeln!(f, "Spacing:      {}", spacing)?,
            None => writeln!(f, "Spacing:      unavailable (pixel-unit output only)")?,
        }
        if let Some(path) = &r.volume_path {
            writeln!(f, "Volume:       {}", path.display())?;
        }

        Ok(())
    }
}
