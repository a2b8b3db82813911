use super::params::ReconstructionParams;
use crate::cleanup::{clean_class_map, CleanupResult};
use crate::cloud::{match_elevations, ElevationResult};
use crate::corners::{detect_corners, CornerDeduplicator, HarrisResult, WindowDeduplicator};
use crate::diagnostics::{
    CleanupStage, CornerStage, DedupStage, ElevationStage, InputDescriptor, MappingStage,
    NormalizationStage, PipelineTrace, ReconstructionReport, RunSummary, SamplingStage, Stopwatch,
    TimingBreakdown,
};
use crate::error::{InputShapeError, ReconstructionError};
use crate::facets::{group_facets, sample_facets, FacetGroups, SamplingResult};
use crate::geo::{CoordinateMapper, GeoReference};
use crate::image::{ClassMap, ImageView};
use crate::normalize::normalize_points;
use crate::types::CloudPoint;
use log::{debug, warn};
use nalgebra::Point3;

/// Chains the reconstruction stages over one building.
pub struct RoofReconstructor {
    params: ReconstructionParams,
}

impl RoofReconstructor {
    pub fn new(params: ReconstructionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ReconstructionParams {
        &self.params
    }

    /// Run the full pipeline. Inputs are validated before any stage runs;
    /// after that the run always completes, possibly with empty groups.
    pub fn process(
        &self,
        map: &ClassMap,
        cloud: &[CloudPoint],
        georef: &GeoReference,
    ) -> Result<ReconstructionReport, ReconstructionError> {
        let total = Stopwatch::start();
        self.params.validate()?;
        if map.width() == 0 || map.height() == 0 {
            return Err(InputShapeError::EmptyClassMap.into());
        }
        if cloud.is_empty() {
            return Err(InputShapeError::EmptyPointCloud.into());
        }
        let mapper = CoordinateMapper::from_reference(georef)?;
        let extent = mapper.validate_extent(map.width(), map.height())?;

        let params = &self.params;
        let mut timings = TimingBreakdown::default();
        let mut summary = RunSummary::default();
        let input = InputDescriptor {
            width: map.width(),
            height: map.height(),
            cloud_points: cloud.len(),
            background: params.background,
        };

        // Cleanup
        let sw = Stopwatch::start();
        let CleanupResult {
            map: cleaned,
            centroids,
            reassigned_labels,
            target_labels,
            reassigned_pixels,
            unassignable_pixels,
        } = clean_class_map(map, params.background, &params.cleanup);
        let cleanup_ms = sw.elapsed_ms();
        timings.push("cleanup", cleanup_ms);
        summary.reassigned_pixels = reassigned_pixels;
        summary.unassignable_pixels = unassignable_pixels;
        let cleanup = CleanupStage {
            elapsed_ms: cleanup_ms,
            min_region_size: params.cleanup.min_region_size,
            centroids,
            reassigned_labels,
            target_labels,
            reassigned_pixels,
            unassignable_pixels,
        };

        // Corners
        let HarrisResult {
            max_response,
            candidates,
            elapsed_ms: corners_ms,
            ..
        } = detect_corners(&cleaned, &params.harris);
        timings.push("corners", corners_ms);
        summary.corner_candidates = candidates.len();
        let corners = CornerStage {
            elapsed_ms: corners_ms,
            max_response,
            threshold: params.harris.threshold * max_response,
            candidates: candidates.len(),
        };

        let mut trace = PipelineTrace {
            input,
            timings,
            cleanup,
            corners,
            dedup: None,
            sampling: None,
            mapping: None,
            elevation: None,
            normalization: None,
        };

        if candidates.is_empty() {
            warn!("reconstruct: no corner candidates, returning empty facet groups");
            summary.no_corners_found = true;
            trace.timings.total_ms = total.elapsed_ms();
            return Ok(ReconstructionReport {
                facets: FacetGroups::new(),
                points: Vec::new(),
                summary,
                trace,
                cleaned_map: cleaned,
            });
        }

        // Dedup
        let sw = Stopwatch::start();
        let kept = WindowDeduplicator::new(params.dedup.clone()).deduplicate(&candidates);
        let dedup_ms = sw.elapsed_ms();
        trace.timings.push("dedup", dedup_ms);
        summary.deduplicated_corners = kept.len();

        // Facet sampling
        let sw = Stopwatch::start();
        let SamplingResult {
            associations,
            dropped,
            out_of_bounds_probes,
        } = sample_facets(&kept, &cleaned, params.background, &params.sampler);
        let sampling_ms = sw.elapsed_ms();
        trace.timings.push("sampling", sampling_ms);
        summary.dropped_corners = dropped.len();
        summary.out_of_bounds_probes = out_of_bounds_probes;
        trace.dedup = Some(DedupStage {
            elapsed_ms: dedup_ms,
            radius: params.dedup.radius,
            order: params.dedup.order,
            input: candidates.len(),
            kept,
        });
        trace.sampling = Some(SamplingStage {
            elapsed_ms: sampling_ms,
            offset: params.sampler.offset,
            associated: associations.len(),
            dropped,
            out_of_bounds_probes,
        });

        // Mapping
        let sw = Stopwatch::start();
        let mapped = mapper.map_associations(associations);
        let mapping_ms = sw.elapsed_ms();
        trace.timings.push("mapping", mapping_ms);

        // Elevation
        let sw = Stopwatch::start();
        let ElevationResult {
            mut points,
            unmatched,
            height_floor,
        } = match_elevations(&mapped, cloud, &params.elevation);
        let elevation_ms = sw.elapsed_ms();
        trace.timings.push("elevation", elevation_ms);
        summary.unmatched_elevations = unmatched.len();
        trace.mapping = Some(MappingStage {
            elapsed_ms: mapping_ms,
            source_epsg: mapper.source().epsg(),
            target_epsg: mapper.target().epsg(),
            extent,
            corners: mapped,
        });
        trace.elevation = Some(ElevationStage {
            elapsed_ms: elevation_ms,
            cloud_points: cloud.len(),
            tolerance: params.elevation.tolerance,
            height_floor,
            matched: points.len(),
            unmatched,
        });

        // Normalization
        let sw = Stopwatch::start();
        let mut positions: Vec<Point3<f64>> = points.iter().map(|p| p.position).collect();
        let stats = normalize_points(&mut positions);
        for (point, pos) in points.iter_mut().zip(positions) {
            point.position = pos;
        }
        let normalization_ms = sw.elapsed_ms();
        trace.timings.push("normalization", normalization_ms);
        summary.degenerate_axes = stats.map_or(0, |s| s.degenerate_axes());
        trace.normalization = Some(NormalizationStage {
            elapsed_ms: normalization_ms,
            stats,
        });

        // Grouping
        let sw = Stopwatch::start();
        let facets = group_facets(&points);
        trace.timings.push("grouping", sw.elapsed_ms());
        summary.facet_corners = points.len();
        summary.facet_groups = facets.len();

        trace.timings.total_ms = total.elapsed_ms();
        debug!(
            "reconstruct: {} corners in {} facet groups ({:.2} ms)",
            summary.facet_corners, summary.facet_groups, trace.timings.total_ms
        );
        Ok(ReconstructionReport {
            facets,
            points,
            summary,
            trace,
            cleaned_map: cleaned,
        })
    }
}
