use crate::types::{CtSlice, SpacingMetadata};
use std::ops::Index;

/// The anatomically ordered slices of one CT study
///
/// Insertion order is anatomical order; the series is read-only after
/// construction. A length of zero is a valid, user-facing condition that
/// downstream volume construction must reject explicitly.
#[derive(Debug, Default)]
pub struct CtSeries {
    slices: Vec<CtSlice>,
}

impl CtSeries {
    /// Wraps already-ordered slices into a series
    pub fn new(slices: Vec<CtSlice>) -> Self {
        Self { slices }
    }

    /// Number of slices in the series
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the series holds no slices
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Slice at `index` in anatomical order
    pub fn get(&self, index: usize) -> Option<&CtSlice> {
        self.slices.get(index)
    }

    /// All slices in anatomical order
    pub fn slices(&self) -> &[CtSlice] {
        &self.slices
    }

    /// Iterates slices in anatomical order
    pub fn iter(&self) -> std::slice::Iter<'_, CtSlice> {
        self.slices.iter()
    }

    /// The representative slice whose spacing attributes are assumed to
    /// apply to the whole series (by convention, the first)
    pub fn representative(&self) -> Option<&CtSlice> {
        self.slices.first()
    }

    /// Spacing attributes of the representative slice
    ///
    /// Taken from the first slice only; consistency across the series is
    /// assumed, not verified. Returns `None` for an empty series.
    pub fn spacing_metadata(&self) -> Option<SpacingMetadata> {
        self.representative().map(|slice| SpacingMetadata {
            pixel_spacing: slice.pixel_spacing,
            slice_thickness_mm: slice.slice_thickness,
            spacing_between_slices_mm: slice.spacing_between_slices,
        })
    }
}

impl Index<usize> for CtSeries {
    type Output = CtSlice;

    fn index(&self, index: usize) -> &CtSlice {
        &self.slices[index]
    }
}

impl<'a> IntoIterator for &'a CtSeries {
    type Item = &'a CtSlice;
    type IntoIter = std::slice::Iter<'a, CtSlice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
