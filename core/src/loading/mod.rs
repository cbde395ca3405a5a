//! Series loading: directory scanning, per-file parsing with graceful
//! skip of non-conforming files, and anatomical ordering.

pub mod parse;
pub mod sort;
pub mod tags;

pub use parse::{parse_slice, ParseOutcome, SkipReason};
pub use sort::{sort_key, sort_slices};

use crate::error::Result;
use crate::types::CtSeries;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// One file excluded during a scan
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Loads and anatomically orders the DICOM slices of a directory
///
/// Skipped files are logged (`warn` for unreadable files, `debug` for
/// non-DICOM content) and otherwise dropped. A directory with zero valid
/// slices yields an empty series; callers building volumes from it must
/// reject that case explicitly.
///
/// # Errors
///
/// Returns an I/O error only when the directory itself cannot be
/// enumerated.
pub fn load_series(directory: &Path, recursive: bool) -> Result<CtSeries> {
    let (series, skipped) = load_series_with_skips(directory, recursive)?;

    for skip in &skipped {
        match &skip.reason {
            SkipReason::Unreadable(_) => {
                warn!("Skipping {}: {}", skip.path.display(), skip.reason)
            }
            SkipReason::NotDicom(_) => {
                debug!("Skipping {}: {}", skip.path.display(), skip.reason)
            }
        }
    }

    Ok(series)
}

/// Like [`load_series`], additionally returning the skipped files so the
/// caller can aggregate or report them.
pub fn load_series_with_skips(
    directory: &Path,
    recursive: bool,
) -> Result<(CtSeries, Vec<SkippedFile>)> {
    let mut candidates = Vec::new();
    collect_files(directory, recursive, &mut candidates)?;

    // Lexicographic path order makes repeated scans deterministic and
    // fixes the tie-break order of the stable sort.
    candidates.sort();

    let mut slices = Vec::new();
    let mut skipped = Vec::new();

    for path in candidates {
        match parse_slice(&path) {
            ParseOutcome::Parsed(slice) => slices.push(*slice),
            ParseOutcome::Skipped(reason) => skipped.push(SkippedFile { path, reason }),
        }
    }

    sort_slices(&mut slices);

    Ok((CtSeries::new(slices), skipped))
}

fn collect_files(directory: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        // file_type() does not follow symlinks: symlinked directories
        // are never recursed into, so a link cycle cannot loop the scan
        if entry.file_type()?.is_dir() {
            if recursive {
                collect_files(&path, recursive, out)?;
            }
            continue;
        }

        // Symlinks to regular files still count as candidates
        if path.is_file() {
            out.push(path);
        }
    }

    Ok(())
}
