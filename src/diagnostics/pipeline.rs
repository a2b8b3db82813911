use super::stages::{
    CleanupStage, CornerStage, DedupStage, ElevationStage, MappingStage, NormalizationStage,
    SamplingStage,
};
use super::summary::RunSummary;
use super::timing::TimingBreakdown;
use crate::facets::FacetGroups;
use crate::image::ClassMap;
use crate::types::FacetCornerPoint;
use serde::Serialize;

/// Result of [`RoofReconstructor::process`](crate::RoofReconstructor::process).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionReport {
    pub facets: FacetGroups,
    /// Normalized corner points in elevation order, with their label sets.
    pub points: Vec<FacetCornerPoint>,
    pub summary: RunSummary,
    pub trace: PipelineTrace,
    /// Class map after cleanup, the raster the corner stages ran on.
    #[serde(skip)]
    pub cleaned_map: ClassMap,
}

/// Stage-by-stage record of one run. Stages that did not execute (the run
/// ended early because nothing survived) are `None`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub cleanup: CleanupStage,
    pub corners: CornerStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup: Option<DedupStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MappingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<ElevationStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationStage>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub cloud_points: usize,
    pub background: u8,
}
