//! External segmentation collaborator.
//!
//! The anatomical segmentation model is consumed as a black box mapping
//! an exported volume file to a labeled mask volume; its labeling
//! taxonomy is an opaque contract this crate does not define.

use crate::error::{CtSlabError, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Maps an exported volume file to a labeled mask volume
pub trait SegmentationModel {
    /// Runs the model on `volume`, writing labels to `output`
    ///
    /// # Errors
    ///
    /// Returns [`CtSlabError::Segmentation`] with the volume path attached
    /// when the model cannot be invoked or reports failure. Failures are
    /// not retried.
    fn segment(&self, volume: &Path, output: &Path) -> Result<()>;
}

/// Segmentation model invoked as an external command
///
/// The command is called as `program [args...] <volume> <output>`.
#[derive(Debug, Clone)]
pub struct CommandSegmenter {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandSegmenter {
    /// Creates a segmenter invoking `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds a fixed argument passed before the volume and output paths
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl SegmentationModel for CommandSegmenter {
    fn segment(&self, volume: &Path, output: &Path) -> Result<()> {
        info!(
            "Running segmentation: {} {} -> {}",
            self.program.display(),
            volume.display(),
            output.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(volume)
            .arg(output)
            .status()
            .map_err(|e| CtSlabError::Segmentation {
                path: volume.to_path_buf(),
                message: format!("failed to launch {}: {}", self.program.display(), e),
            })?;

        if !status.success() {
            return Err(CtSlabError::Segmentation {
                path: volume.to_path_buf(),
                message: format!("{} exited with {}", self.program.display(), status),
            });
        }

        Ok(())
    }
}
