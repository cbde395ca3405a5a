//! Synthetic single-slice DICOM fixtures for tests.

use crate::types::CtSlice;
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::tags;
use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::{FileDicomObject, InMemDicomObject};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Builder for minimal CT slice objects with native 16-bit pixel data.
pub(crate) struct SliceFixture {
    rows: u16,
    cols: u16,
    fill: u16,
    position: Option<Vec<String>>,
    instance_number: Option<i64>,
    rescale: Option<(f64, f64)>,
    pixel_spacing: Option<(f64, f64)>,
    slice_thickness: Option<f64>,
    spacing_between_slices: Option<f64>,
}

impl SliceFixture {
    pub(crate) fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            fill: 0,
            position: None,
            instance_number: None,
            rescale: None,
            pixel_spacing: None,
            slice_thickness: None,
            spacing_between_slices: None,
        }
    }

    pub(crate) fn fill_value(mut self, value: u16) -> Self {
        self.fill = value;
        self
    }

    pub(crate) fn position(mut self, pos: [f64; 3]) -> Self {
        self.position = Some(pos.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Sets ImagePositionPatient from a raw decimal string, malformed or short
    /// values included. Components are split the way the file parser would.
    pub(crate) fn raw_position(mut self, raw: &str) -> Self {
        self.position = Some(raw.split('\\').map(str::to_string).collect());
        self
    }

    pub(crate) fn instance_number(mut self, n: i64) -> Self {
        self.instance_number = Some(n);
        self
    }

    pub(crate) fn rescale(mut self, slope: f64, intercept: f64) -> Self {
        self.rescale = Some((slope, intercept));
        self
    }

    pub(crate) fn pixel_spacing(mut self, row: f64, col: f64) -> Self {
        self.pixel_spacing = Some((row, col));
        self
    }

    pub(crate) fn slice_thickness(mut self, mm: f64) -> Self {
        self.slice_thickness = Some(mm);
        self
    }

    pub(crate) fn spacing_between_slices(mut self, mm: f64) -> Self {
        self.spacing_between_slices = Some(mm);
        self
    }

    pub(crate) fn build_object(&self) -> FileDicomObject<InMemDicomObject> {
        let mut dcm = InMemDicomObject::new_empty();
        let sop_uid = format!("1.2.826.0.1.3680043.9.{}", NEXT_UID.fetch_add(1, Ordering::SeqCst));

        dcm.put(DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(CT_IMAGE_STORAGE),
        ));
        dcm.put(DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(sop_uid.as_str()),
        ));
        dcm.put(DataElement::new(
            tags::MODALITY,
            VR::CS,
            PrimitiveValue::from("CT"),
        ));
        dcm.put(DataElement::new(
            tags::SAMPLES_PER_PIXEL,
            VR::US,
            PrimitiveValue::from(1_u16),
        ));
        dcm.put(DataElement::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ));
        dcm.put(DataElement::new(
            tags::ROWS,
            VR::US,
            PrimitiveValue::from(self.rows),
        ));
        dcm.put(DataElement::new(
            tags::COLUMNS,
            VR::US,
            PrimitiveValue::from(self.cols),
        ));
        dcm.put(DataElement::new(
            tags::BITS_ALLOCATED,
            VR::US,
            PrimitiveValue::from(16_u16),
        ));
        dcm.put(DataElement::new(
            tags::BITS_STORED,
            VR::US,
            PrimitiveValue::from(16_u16),
        ));
        dcm.put(DataElement::new(
            tags::HIGH_BIT,
            VR::US,
            PrimitiveValue::from(15_u16),
        ));
        dcm.put(DataElement::new(
            tags::PIXEL_REPRESENTATION,
            VR::US,
            PrimitiveValue::from(0_u16),
        ));

        if let Some(parts) = &self.position {
            dcm.put(DataElement::new(
                tags::IMAGE_POSITION_PATIENT,
                VR::DS,
                PrimitiveValue::Strs(parts.clone().into()),
            ));
        }
        if let Some(n) = self.instance_number {
            dcm.put(DataElement::new(
                tags::INSTANCE_NUMBER,
                VR::IS,
                PrimitiveValue::from(n.to_string()),
            ));
        }
        if let Some((slope, intercept)) = self.rescale {
            dcm.put(DataElement::new(
                tags::RESCALE_SLOPE,
                VR::DS,
                PrimitiveValue::from(slope.to_string()),
            ));
            dcm.put(DataElement::new(
                tags::RESCALE_INTERCEPT,
                VR::DS,
                PrimitiveValue::from(intercept.to_string()),
            ));
        }
        if let Some((row, col)) = self.pixel_spacing {
            dcm.put(DataElement::new(
                tags::PIXEL_SPACING,
                VR::DS,
                PrimitiveValue::Strs(vec![row.to_string(), col.to_string()].into()),
            ));
        }
        if let Some(mm) = self.slice_thickness {
            dcm.put(DataElement::new(
                tags::SLICE_THICKNESS,
                VR::DS,
                PrimitiveValue::from(mm.to_string()),
            ));
        }
        if let Some(mm) = self.spacing_between_slices {
            dcm.put(DataElement::new(
                tags::SPACING_BETWEEN_SLICES,
                VR::DS,
                PrimitiveValue::from(mm.to_string()),
            ));
        }

        let pixel_count = usize::from(self.rows) * usize::from(self.cols);
        dcm.put(DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U16(vec![self.fill; pixel_count].into()),
        ));

        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(sop_uid)
            .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN);

        dcm.with_meta(meta).expect("valid file meta")
    }

    pub(crate) fn build_slice(&self) -> CtSlice {
        CtSlice::from_object(PathBuf::from("synthetic.dcm"), self.build_object())
    }

    /// Writes the fixture to `dir/name` as a DICOM Part 10 file.
    pub(crate) fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.build_object()
            .write_to_file(&path)
            .expect("write DICOM fixture");
        path
    }
}
