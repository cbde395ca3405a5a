use ndarray::Array3;

/// A Hounsfield-Unit sub-volume cut from an ordered series
///
/// Axes are (depth Z, height Y, width X). `start` and `end` are the
/// inclusive bounds into the series that produced the slab; the slab
/// keeps no other reference to its source series.
///
/// Invariant: `start <= end` and `depth() == end - start + 1`.
#[derive(Debug)]
pub struct HuSlab {
    /// HU voxel data, shape (depth, height, width)
    pub data: Array3<f32>,

    /// First series index included in the slab (inclusive)
    pub start: usize,

    /// Last series index included in the slab (inclusive)
    pub end: usize,
}

impl HuSlab {
    /// Inclusive series index bounds `(start, end)`
    ///
    /// Boundary clamping silently shrinks the window: callers that
    /// require an exact window size must compare these bounds against the
    /// requested `center ± half_window`.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of slices in the slab
    pub fn depth(&self) -> usize {
        self.end - self.start + 1
    }

    /// Shape as (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Minimum and maximum HU values over the whole slab
    ///
    /// Returns `None` for a zero-voxel slab, which cannot be produced by
    /// the extractor but is representable.
    pub fn hu_range(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
