use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Slice Geometry Tags
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);

// Rescale Tags
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);

/// Helper to get a string value from a DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get an integer value from a DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i64
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i64>().ok())
}

/// Helper to get a floating-point value from a DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Helper to get a multi-valued floating-point value from a DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<f64>
pub fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
        .map(|values| values.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_values() {
        // Just ensure tags are correctly defined
        assert_eq!(IMAGE_POSITION_PATIENT, Tag(0x0020, 0x0032));
        assert_eq!(INSTANCE_NUMBER, Tag(0x0020, 0x0013));
        assert_eq!(RESCALE_SLOPE, Tag(0x0028, 0x1053));
        assert_eq!(RESCALE_INTERCEPT, Tag(0x0028, 0x1052));
        assert_eq!(PIXEL_SPACING, Tag(0x0028, 0x0030));
    }
}
