use std::path::PathBuf;
use thiserror::Error;

/// Result type for ctslab operations
pub type Result<T> = std::result::Result<T, CtSlabError>;

/// Error types for ctslab operations
#[derive(Error, Debug)]
pub enum CtSlabError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    Dicom(String),

    /// Pixel data could not be decoded
    #[error("Pixel data error: {0}")]
    PixelData(String),

    /// Directory yielded zero valid slices
    #[error("No valid DICOM slices found in series")]
    EmptySeries,

    /// Requested slice index is outside the assembled series
    #[error("Slice index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Slices in the requested range differ in rows/columns
    #[error("Inconsistent slice dimensions within series")]
    InconsistentDimensions,

    /// Representative slice carries no usable spacing attributes
    #[error("Pixel spacing unavailable on representative slice")]
    SpacingUnavailable,

    /// Volume writer failure, with destination context
    #[error("Failed to write volume to {path}: {message}")]
    Writer { path: PathBuf, message: String },

    /// External segmentation model failure, with volume context
    #[error("Segmentation of {path} failed: {message}")]
    Segmentation { path: PathBuf, message: String },

    /// Invalid attribute value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sidecar (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Helper conversions
impl From<String> for CtSlabError {
    fn from(s: String) -> Self {
        CtSlabError::InvalidValue(s)
    }
}

impl From<&str> for CtSlabError {
    fn from(s: &str) -> Self {
        CtSlabError::InvalidValue(s.to_string())
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for CtSlabError {
    fn from(e: dicom_object::ReadError) -> Self {
        CtSlabError::Dicom(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for CtSlabError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        CtSlabError::InvalidValue(format!("{}", e))
    }
}
