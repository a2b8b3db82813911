//! Serializable run report of the reconstruction pipeline.
//!
//! [`ReconstructionReport`] is what [`RoofReconstructor`](crate::RoofReconstructor)
//! returns: the facet groups, a [`RunSummary`] of every recoverable condition
//! met on the way, and a [`PipelineTrace`] with one record per stage.

pub mod pipeline;
pub mod stages;
pub mod summary;
pub mod timing;

pub use pipeline::{InputDescriptor, PipelineTrace, ReconstructionReport};
pub use stages::{
    CleanupStage, CornerStage, DedupStage, ElevationStage, MappingStage, NormalizationStage,
    SamplingStage,
};
pub use summary::RunSummary;
pub use timing::{StageTiming, Stopwatch, TimingBreakdown};
