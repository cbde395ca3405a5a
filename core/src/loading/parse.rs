use crate::types::CtSlice;
use dicom_object::open_file;
use std::fmt;
use std::path::Path;

/// Outcome of parsing one candidate file
///
/// Parsing is total: a file that is not a valid DICOM image, or that the
/// filesystem refuses to read, is classified as [`ParseOutcome::Skipped`]
/// rather than surfaced as an error, so a directory mixing DICOM and
/// non-DICOM files never aborts a scan.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The file parsed as a single-slice DICOM image
    Parsed(Box<CtSlice>),

    /// The file was excluded from the series
    Skipped(SkipReason),
}

/// Why a candidate file was excluded from the series
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file content is not a DICOM image
    NotDicom(String),

    /// The file could not be read from disk
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotDicom(msg) => write!(f, "not a DICOM image: {}", msg),
            SkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

/// Parses one candidate file into a slice, or classifies why it was skipped
///
/// Never fails: missing optional attributes (position, instance number,
/// spacing, rescale) still parse successfully and are simply absent on the
/// resulting [`CtSlice`].
pub fn parse_slice(path: &Path) -> ParseOutcome {
    match open_file(path) {
        Ok(object) => ParseOutcome::Parsed(Box::new(CtSlice::from_object(
            path.to_path_buf(),
            object,
        ))),
        Err(err) => ParseOutcome::Skipped(classify(&err)),
    }
}

/// Distinguishes filesystem failures from non-DICOM content by walking the
/// error source chain for an underlying I/O error.
///
/// An unexpected EOF counts as content, not filesystem: files shorter than
/// the 132-byte DICOM preamble fail that way.
fn classify(err: &dicom_object::ReadError) -> SkipReason {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() != std::io::ErrorKind::UnexpectedEof {
                return SkipReason::Unreadable(err.to_string());
            }
        }
        source = cause.source();
    }
    SkipReason::NotDicom(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SliceFixture;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_slice() {
        let temp_dir = TempDir::new().unwrap();
        let path = SliceFixture::new(2, 2)
            .position([0.0, 0.0, -50.0])
            .write_to(temp_dir.path(), "slice.dcm");

        match parse_slice(&path) {
            ParseOutcome::Parsed(slice) => {
                assert_eq!(slice.path, path);
                assert_eq!(slice.z_position(), Some(-50.0));
            }
            ParseOutcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }

    #[test]
    fn test_parse_non_dicom_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        File::create(&path)
            .unwrap()
            .write_all(b"plain text, not a DICOM file")
            .unwrap();

        assert!(matches!(
            parse_slice(&path),
            ParseOutcome::Skipped(SkipReason::NotDicom(_))
        ));
    }

    #[test]
    fn test_parse_non_dicom_file_with_full_preamble() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.png");
        File::create(&path)
            .unwrap()
            .write_all(&[0u8; 512])
            .unwrap();

        assert!(matches!(
            parse_slice(&path),
            ParseOutcome::Skipped(SkipReason::NotDicom(_))
        ));
    }

    #[test]
    fn test_parse_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does_not_exist.dcm");

        assert!(matches!(
            parse_slice(&path),
            ParseOutcome::Skipped(SkipReason::Unreadable(_))
        ));
    }

    #[test]
    fn test_parse_without_optional_attributes() {
        let temp_dir = TempDir::new().unwrap();
        let path = SliceFixture::new(2, 2).write_to(temp_dir.path(), "bare.dcm");

        match parse_slice(&path) {
            ParseOutcome::Parsed(slice) => {
                assert_eq!(slice.position, None);
                assert_eq!(slice.instance_number, None);
                assert_eq!(slice.pixel_spacing, None);
            }
            ParseOutcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }
}
