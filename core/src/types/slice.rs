use crate::error::{CtSlabError, Result};
use crate::loading::tags::{
    get_float_value, get_int_value, get_multi_float_value, get_string_value, IMAGE_POSITION_PATIENT,
    INSTANCE_NUMBER, PIXEL_SPACING, RESCALE_INTERCEPT, RESCALE_SLOPE, SLICE_THICKNESS,
    SPACING_BETWEEN_SLICES,
};
use crate::types::PixelSpacing;
use dicom_object::{FileDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use ndarray::{s, Array2, Ix4};
use std::path::PathBuf;

/// One parsed single-slice DICOM file
///
/// The geometry and rescale attributes are extracted once at parse time
/// into explicit optional fields: an attribute that is absent, malformed,
/// or too short is represented as `None` rather than probed for later.
/// The pixel payload stays encoded in the retained object and is decoded
/// on demand by [`CtSlice::stored_pixels`].
///
/// A slice is immutable once parsed.
#[derive(Debug)]
pub struct CtSlice {
    /// Path to the source DICOM file
    pub path: PathBuf,

    /// ImagePositionPatient (x, y, z) in mm, when present with 3 components
    pub position: Option<[f64; 3]>,

    /// InstanceNumber, when present and numeric
    pub instance_number: Option<i64>,

    /// RescaleSlope, when present
    pub rescale_slope: Option<f64>,

    /// RescaleIntercept, when present
    pub rescale_intercept: Option<f64>,

    /// PixelSpacing (row, column) in mm, when present
    pub pixel_spacing: Option<PixelSpacing>,

    /// SliceThickness in mm, when present
    pub slice_thickness: Option<f64>,

    /// SpacingBetweenSlices in mm, when present
    pub spacing_between_slices: Option<f64>,

    object: FileDicomObject<InMemDicomObject>,
}

impl CtSlice {
    /// Creates a slice from an already-parsed DICOM object
    pub fn from_object(path: PathBuf, object: FileDicomObject<InMemDicomObject>) -> Self {
        Self {
            position: extract_position(&object),
            instance_number: get_int_value(&object, INSTANCE_NUMBER),
            rescale_slope: get_float_value(&object, RESCALE_SLOPE),
            rescale_intercept: get_float_value(&object, RESCALE_INTERCEPT),
            pixel_spacing: extract_pixel_spacing(&object),
            slice_thickness: get_float_value(&object, SLICE_THICKNESS),
            spacing_between_slices: get_float_value(&object, SPACING_BETWEEN_SLICES),
            path,
            object,
        }
    }

    /// Returns the underlying DICOM object
    pub fn object(&self) -> &FileDicomObject<InMemDicomObject> {
        &self.object
    }

    /// Z component of the slice position, when geometry is present
    pub fn z_position(&self) -> Option<f64> {
        self.position.map(|pos| pos[2])
    }

    /// Decodes the stored pixel values as a (rows, columns) array
    ///
    /// Values are the raw stored integers, before any rescale is applied.
    ///
    /// # Errors
    ///
    /// Returns [`CtSlabError::PixelData`] if the file has no decodable
    /// pixel data
    pub fn stored_pixels(&self) -> Result<Array2<i32>> {
        let decoded = self
            .object
            .decode_pixel_data()
            .map_err(|e| CtSlabError::PixelData(format!("{}: {}", self.path.display(), e)))?;

        // The modality LUT must stay off here: the HU converter applies
        // the rescale calibration itself, exactly once.
        let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
        let array = decoded
            .to_ndarray_with_options::<i32>(&options)
            .map_err(|e| CtSlabError::PixelData(format!("{}: {}", self.path.display(), e)))?;

        // (frames, rows, columns, samples); single-frame grayscale expected
        let array = array
            .into_dimensionality::<Ix4>()
            .map_err(|e| CtSlabError::PixelData(format!("{}: {}", self.path.display(), e)))?;

        Ok(array.slice_move(s![0, .., .., 0]))
    }
}

fn extract_position(dcm: &InMemDicomObject) -> Option<[f64; 3]> {
    let values = get_multi_float_value(dcm, IMAGE_POSITION_PATIENT)?;
    if values.len() < 3 {
        return None;
    }
    Some([values[0], values[1], values[2]])
}

fn extract_pixel_spacing(dcm: &InMemDicomObject) -> Option<PixelSpacing> {
    if let Some(values) = get_multi_float_value(dcm, PIXEL_SPACING) {
        if values.len() >= 2 {
            return Some(PixelSpacing::new(values[0], values[1]));
        }
    }

    // Some writers emit spacing as a single loosely formatted string
    get_string_value(dcm, PIXEL_SPACING).and_then(|s| PixelSpacing::parse(&s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SliceFixture;

    #[test]
    fn test_attributes_extracted_at_parse_time() {
        let slice = SliceFixture::new(2, 2)
            .position([-12.5, 4.0, -155.25])
            .instance_number(42)
            .rescale(2.0, -1024.0)
            .pixel_spacing(0.5, 0.25)
            .slice_thickness(5.0)
            .build_slice();

        assert_eq!(slice.position, Some([-12.5, 4.0, -155.25]));
        assert_eq!(slice.z_position(), Some(-155.25));
        assert_eq!(slice.instance_number, Some(42));
        assert_eq!(slice.rescale_slope, Some(2.0));
        assert_eq!(slice.rescale_intercept, Some(-1024.0));
        assert_eq!(slice.pixel_spacing, Some(PixelSpacing::new(0.5, 0.25)));
        assert_eq!(slice.slice_thickness, Some(5.0));
        assert_eq!(slice.spacing_between_slices, None);
    }

    #[test]
    fn test_missing_attributes_are_none() {
        let slice = SliceFixture::new(2, 2).build_slice();

        assert_eq!(slice.position, None);
        assert_eq!(slice.z_position(), None);
        assert_eq!(slice.instance_number, None);
        assert_eq!(slice.rescale_slope, None);
        assert_eq!(slice.rescale_intercept, None);
        assert_eq!(slice.pixel_spacing, None);
    }

    #[test]
    fn test_short_position_is_none() {
        // Two components cannot provide a Z position
        let slice = SliceFixture::new(2, 2).raw_position("1.0\\2.0").build_slice();
        assert_eq!(slice.position, None);
    }

    #[test]
    fn test_stored_pixels_shape_and_values() {
        let slice = SliceFixture::new(2, 3).fill_value(7).build_slice();

        let pixels = slice.stored_pixels().unwrap();
        assert_eq!(pixels.dim(), (2, 3));
        assert!(pixels.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_stored_pixels_are_raw_despite_calibration() {
        // Rescale attributes on the file must not leak into the decode
        let slice = SliceFixture::new(2, 2)
            .fill_value(100)
            .rescale(2.0, -1024.0)
            .build_slice();

        let pixels = slice.stored_pixels().unwrap();
        assert!(pixels.iter().all(|&v| v == 100));
    }
}
