use serde::Serialize;

/// Counters for every condition that narrowed the result without failing
/// the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Pixels moved to another label by the cleanup.
    pub reassigned_pixels: usize,
    /// Pixels that needed reassignment but had no target class.
    pub unassignable_pixels: usize,
    /// The detector found no corner candidate at all.
    pub no_corners_found: bool,
    pub corner_candidates: usize,
    pub deduplicated_corners: usize,
    /// Corners whose probes saw only background or fell off the map.
    pub dropped_corners: usize,
    pub out_of_bounds_probes: usize,
    /// Corners without cloud support inside the planar window.
    pub unmatched_elevations: usize,
    pub degenerate_axes: usize,
    pub facet_corners: usize,
    pub facet_groups: usize,
}

impl RunSummary {
    /// Whether every deduplicated corner made it into the 3D point set.
    pub fn is_complete(&self) -> bool {
        !self.no_corners_found && self.dropped_corners == 0 && self.unmatched_elevations == 0
    }
}
