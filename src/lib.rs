#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod geo;
pub mod image;
pub mod reconstructor;
pub mod types;

// Stage implementations. Public so tools can run them one by one.
pub mod cleanup;
pub mod cloud;
pub mod corners;
pub mod edges;
pub mod facets;
pub mod filters;
pub mod normalize;

// Tool configuration (JSON).
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{InputShapeError, ReconstructionError};
pub use crate::facets::FacetGroups;
pub use crate::reconstructor::{ReconstructionParams, RoofReconstructor};

pub use crate::diagnostics::{PipelineTrace, ReconstructionReport, RunSummary};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use roof_facets::prelude::*;
///
/// # fn main() -> Result<(), ReconstructionError> {
/// let map = ClassMap::filled(64, 64, 6);
/// let cloud = vec![CloudPoint::new(674_000.0, 6_581_000.0, 5.0, 6)];
/// let georef = GeoReference::new(
///     AffineTransform::new(0.25, 0.0, 674_000.0, 0.0, -0.25, 6_581_000.0),
///     Crs::Sweref99Tm,
///     Crs::Sweref99Tm,
/// );
///
/// let report = RoofReconstructor::new(ReconstructionParams::default())
///     .process(&map, &cloud, &georef)?;
/// println!("groups={} corners={}", report.facets.len(), report.summary.facet_corners);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::geo::{AffineTransform, Crs, GeoReference};
    pub use crate::image::{ClassMap, FacetLabel};
    pub use crate::types::{CloudPoint, FacetGroup};
    pub use crate::{
        FacetGroups, ReconstructionError, ReconstructionParams, ReconstructionReport,
        RoofReconstructor,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners, in pipeline order.
    pub use crate::cleanup::{clean_class_map, CleanupOptions, CleanupResult};
    pub use crate::cloud::{match_elevations, ElevationOptions, ElevationResult};
    pub use crate::corners::{
        detect_corners, CornerDeduplicator, DedupOptions, HarrisOptions, HarrisResult,
        WindowDeduplicator,
    };
    pub use crate::facets::{group_facets, sample_facets, SamplerOptions, SamplingResult};
    pub use crate::geo::CoordinateMapper;
    pub use crate::normalize::{normalize_points, Normalization};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        CleanupStage, CornerStage, DedupStage, ElevationStage, InputDescriptor, MappingStage,
        NormalizationStage, SamplingStage, StageTiming, TimingBreakdown,
    };
}
