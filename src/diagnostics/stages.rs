use crate::cleanup::ClassCentroid;
use crate::corners::ScanOrder;
use crate::image::FacetLabel;
use crate::normalize::Normalization;
use crate::types::{Corner, MappedCorner};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupStage {
    pub elapsed_ms: f64,
    pub min_region_size: usize,
    pub centroids: Vec<ClassCentroid>,
    pub reassigned_labels: Vec<FacetLabel>,
    pub target_labels: Vec<FacetLabel>,
    pub reassigned_pixels: usize,
    pub unassignable_pixels: usize,
}

/// Corner response statistics. `threshold` is the absolute cut `τ·max`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerStage {
    pub elapsed_ms: f64,
    pub max_response: f32,
    pub threshold: f32,
    pub candidates: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupStage {
    pub elapsed_ms: f64,
    pub radius: usize,
    pub order: ScanOrder,
    pub input: usize,
    pub kept: Vec<Corner>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingStage {
    pub elapsed_ms: f64,
    pub offset: usize,
    pub associated: usize,
    pub dropped: Vec<Corner>,
    pub out_of_bounds_probes: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingStage {
    pub elapsed_ms: f64,
    pub source_epsg: u32,
    pub target_epsg: u32,
    /// Raster extent in the source CRS, `[min_x, min_y, max_x, max_y]`.
    pub extent: [f64; 4],
    pub corners: Vec<MappedCorner>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationStage {
    pub elapsed_ms: f64,
    pub cloud_points: usize,
    pub tolerance: f64,
    pub height_floor: f64,
    pub matched: usize,
    pub unmatched: Vec<Corner>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationStage {
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Normalization>,
}
