pub mod api;
pub mod cli;
pub mod error;
pub mod export;
pub mod hu;
pub mod loading;
pub mod segmentation;
pub mod slab;
pub mod tissue;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::CtStudy;
pub use cli::report::{SlabReport, TextReport};
pub use error::{CtSlabError, Result};
pub use export::export_volume;
pub use export::sidecar::{CenterSliceSidecar, SpacingSidecar};
pub use hu::{to_hu, DEFAULT_RESCALE_INTERCEPT, DEFAULT_RESCALE_SLOPE};
pub use loading::{load_series, load_series_with_skips, parse_slice, sort_key, ParseOutcome, SkipReason};
pub use segmentation::{CommandSegmenter, SegmentationModel};
pub use slab::extract_slab;
pub use tissue::{tissue_area_mm2, tissue_mask, TissueClass};
pub use types::*;
