//! Cardinal-direction label sampling around corners.
//!
//! Each corner is probed at distance `d` right, left, below and above it,
//! in that order. Probes outside the map are skipped individually. The
//! distinct non-background labels found form the corner's facet set; a corner
//! with an empty set borders no facet and is dropped.
use crate::image::{ClassMap, FacetLabel};
use crate::types::{Corner, FacetAssociation, FacetProbe};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerOptions {
    /// Probe distance `d` in pixels.
    pub offset: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self { offset: 20 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SamplingResult {
    pub associations: Vec<FacetAssociation>,
    /// Corners whose probes found no facet label.
    pub dropped: Vec<Corner>,
    /// Probes skipped because they fell outside the map.
    pub out_of_bounds_probes: usize,
}

/// `(Δrow, Δcol)` of the four probes, in visiting order.
///
/// Distances beyond `isize::MAX` saturate; such probes always land outside
/// the map.
pub fn probe_offsets(d: usize) -> [(isize, isize); 4] {
    let d = isize::try_from(d).unwrap_or(isize::MAX);
    [(0, d), (0, -d), (d, 0), (-d, 0)]
}

pub fn sample_facets(
    corners: &[Corner],
    map: &ClassMap,
    background: FacetLabel,
    options: &SamplerOptions,
) -> SamplingResult {
    let offsets = probe_offsets(options.offset);
    let mut result = SamplingResult::default();

    for corner in corners {
        let mut probes: Vec<FacetProbe> = Vec::with_capacity(offsets.len());
        for (dr, dc) in offsets {
            let hit = match (
                (corner.row as isize).checked_add(dr),
                (corner.col as isize).checked_add(dc),
            ) {
                (Some(row), Some(col)) => map.probe(row, col).map(|label| (row, col, label)),
                _ => None,
            };
            let Some((row, col, label)) = hit else {
                result.out_of_bounds_probes += 1;
                continue;
            };
            if label == background || probes.iter().any(|p| p.label == label) {
                continue;
            }
            probes.push(FacetProbe {
                label,
                row: row as usize,
                col: col as usize,
            });
        }

        if probes.is_empty() {
            result.dropped.push(*corner);
        } else {
            result.associations.push(FacetAssociation {
                corner: *corner,
                probes,
            });
        }
    }

    debug!(
        "sampler: {} corners kept, {} without facets, {} probes out of bounds",
        result.associations.len(),
        result.dropped.len(),
        result.out_of_bounds_probes
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: FacetLabel = 6;

    fn quadrants() -> ClassMap {
        // 1 | 2
        // --+--
        // 3 | 6
        let mut map = ClassMap::filled(8, 8, BG);
        for row in 0..8 {
            for col in 0..8 {
                let label = match (row < 4, col < 4) {
                    (true, true) => 1,
                    (true, false) => 2,
                    (false, true) => 3,
                    (false, false) => BG,
                };
                map.set(row, col, label);
            }
        }
        map
    }

    #[test]
    fn collects_distinct_labels_in_probe_order() {
        let map = quadrants();
        let corner = Corner::new(3, 3, 1.0);
        let res = sample_facets(&[corner], &map, BG, &SamplerOptions { offset: 2 });
        assert_eq!(res.associations.len(), 1);
        // right (3,5)=2, left (3,1)=1, below (5,3)=3, above (1,3)=1 (duplicate)
        assert_eq!(res.associations[0].labels(), vec![2, 1, 3]);
        assert_eq!(
            res.associations[0].probes[0],
            FacetProbe {
                label: 2,
                row: 3,
                col: 5
            }
        );
        assert_eq!(res.out_of_bounds_probes, 0);
    }

    #[test]
    fn out_of_bounds_probe_skips_only_that_probe() {
        let map = quadrants();
        let opts = SamplerOptions { offset: 3 };
        let res = sample_facets(&[Corner::new(1, 6, 1.0)], &map, BG, &opts);
        // right out, left (1,3)=1, below (4,6)=BG, above out
        assert_eq!(res.out_of_bounds_probes, 2);
        assert_eq!(res.associations[0].labels(), vec![1]);
    }

    #[test]
    fn corner_surrounded_by_background_is_dropped() {
        let map = quadrants();
        let opts = SamplerOptions { offset: 1 };
        let res = sample_facets(&[Corner::new(6, 6, 1.0)], &map, BG, &opts);
        assert!(res.associations.is_empty());
        assert_eq!(res.dropped.len(), 1);
    }

    #[test]
    fn right_neighbour_comes_before_lower_neighbour() {
        // label 1 to the right of (4,4), label 2 below it
        let mut map = ClassMap::filled(9, 9, BG);
        map.set(4, 6, 1);
        map.set(6, 4, 2);
        let corner = Corner::new(4, 4, 1.0);
        let res = sample_facets(&[corner], &map, BG, &SamplerOptions { offset: 2 });
        assert_eq!(res.associations[0].labels(), vec![1, 2]);
        assert_eq!(res.associations[0].probes[1].row, 6);
        assert_eq!(res.associations[0].probes[1].col, 4);
    }

    #[test]
    fn huge_offset_lands_every_probe_outside_the_map() {
        let map = quadrants();
        let corners = [
            Corner::new(0, 0, 1.0),
            Corner::new(3, 3, 1.0),
            Corner::new(7, 7, 1.0),
        ];
        for offset in [isize::MAX as usize, isize::MAX as usize + 1, usize::MAX] {
            let res = sample_facets(&corners, &map, BG, &SamplerOptions { offset });
            assert!(res.associations.is_empty());
            assert_eq!(res.dropped.len(), corners.len());
            assert_eq!(res.out_of_bounds_probes, 4 * corners.len());
        }
    }
}
