//! Class-map cleanup: reassign small or ambiguous facet labels.
//!
//! Every label whose pixel count is below `min_region_size`, or which is
//! listed in `always_reassign`, donates its pixels to the *other* label whose
//! centroid is nearest to each pixel. Only labels that are large enough, are
//! not the background and are not themselves flagged can receive pixels.
//!
//! Sizes and centroids are computed once from the input map, so the order in
//! which labels are processed never matters. Proximity is measured to the
//! centroid of a class, not to its boundary.
//!
//! If no class qualifies as a target, the affected pixels keep their label
//! and are reported as unassignable.
use crate::image::labels::LABEL_COUNT;
use crate::image::rows::fill_rows;
use crate::image::{ClassMap, FacetLabel, ImageView};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Options for [`clean_class_map`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupOptions {
    /// Minimum pixel count for a label to survive (`T`).
    pub min_region_size: usize,
    /// Labels reassigned regardless of their size.
    pub always_reassign: Vec<FacetLabel>,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            min_region_size: 500,
            always_reassign: vec![5],
        }
    }
}

/// Mean pixel position of one label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCentroid {
    pub label: FacetLabel,
    pub pixel_count: usize,
    pub row: f64,
    pub col: f64,
}

/// Per-label centroids, ordered by label value.
pub fn class_centroids(map: &ClassMap) -> Vec<ClassCentroid> {
    let mut sums = [(0usize, 0.0f64, 0.0f64); LABEL_COUNT];
    for row in 0..map.height() {
        for (col, &label) in map.row(row).iter().enumerate() {
            let entry = &mut sums[label as usize];
            entry.0 += 1;
            entry.1 += row as f64;
            entry.2 += col as f64;
        }
    }
    sums.iter()
        .enumerate()
        .filter(|(_, (count, _, _))| *count > 0)
        .map(|(label, &(count, r, c))| ClassCentroid {
            label: label as FacetLabel,
            pixel_count: count,
            row: r / count as f64,
            col: c / count as f64,
        })
        .collect()
}

/// Cleaned map together with what the cleanup changed.
#[derive(Clone, Debug)]
pub struct CleanupResult {
    pub map: ClassMap,
    pub centroids: Vec<ClassCentroid>,
    /// Labels whose pixels were candidates for reassignment.
    pub reassigned_labels: Vec<FacetLabel>,
    /// Labels that were allowed to receive pixels.
    pub target_labels: Vec<FacetLabel>,
    pub reassigned_pixels: usize,
    /// Pixels left untouched because no target class exists.
    pub unassignable_pixels: usize,
}

/// Produce a cleaned copy of `map`. The input is left untouched.
pub fn clean_class_map(
    map: &ClassMap,
    background: FacetLabel,
    options: &CleanupOptions,
) -> CleanupResult {
    let centroids = class_centroids(map);

    let flagged = |c: &ClassCentroid| options.always_reassign.contains(&c.label);
    let mut reassign = [false; LABEL_COUNT];
    let mut reassigned_labels = Vec::new();
    let mut targets = Vec::new();
    for c in &centroids {
        if c.label == background {
            continue;
        }
        if c.pixel_count < options.min_region_size || flagged(c) {
            reassign[c.label as usize] = true;
            reassigned_labels.push(c.label);
        } else {
            targets.push(*c);
        }
    }

    let mut out = map.clone();
    let target_labels: Vec<FacetLabel> = targets.iter().map(|c| c.label).collect();
    if reassigned_labels.is_empty() {
        debug!("cleanup: every label meets the size threshold");
        return CleanupResult {
            map: out,
            centroids,
            reassigned_labels,
            target_labels,
            reassigned_pixels: 0,
            unassignable_pixels: 0,
        };
    }

    let candidate_pixels: usize = centroids
        .iter()
        .filter(|c| reassign[c.label as usize])
        .map(|c| c.pixel_count)
        .sum();
    if targets.is_empty() {
        warn!(
            "cleanup: no class reaches {} pixels, leaving {} pixels unassigned",
            options.min_region_size, candidate_pixels
        );
        return CleanupResult {
            map: out,
            centroids,
            reassigned_labels,
            target_labels,
            reassigned_pixels: 0,
            unassignable_pixels: candidate_pixels,
        };
    }

    let width = map.width();
    fill_rows(out.labels_mut(), width, |row, dst| {
        for (col, px) in dst.iter_mut().enumerate() {
            if reassign[*px as usize] {
                *px = nearest_target(&targets, row, col);
            }
        }
    });
    debug!(
        "cleanup: reassigned {} pixels from labels {:?} onto {:?}",
        candidate_pixels, reassigned_labels, target_labels
    );

    CleanupResult {
        map: out,
        centroids,
        reassigned_labels,
        target_labels,
        reassigned_pixels: candidate_pixels,
        unassignable_pixels: 0,
    }
}

/// Target whose centroid is closest to `(row, col)`; ties keep the lower label.
fn nearest_target(targets: &[ClassCentroid], row: usize, col: usize) -> FacetLabel {
    let mut best = targets[0].label;
    let mut best_dist = f64::INFINITY;
    for t in targets {
        let dr = row as f64 - t.row;
        let dc = col as f64 - t.col;
        let dist = dr * dr + dc * dc;
        if dist < best_dist {
            best_dist = dist;
            best = t.label;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(min_region_size: usize) -> CleanupOptions {
        CleanupOptions {
            min_region_size,
            always_reassign: Vec::new(),
        }
    }

    #[test]
    fn centroids_are_pixel_means() {
        let map = ClassMap::new(3, 2, vec![1, 1, 2, 1, 1, 2]).unwrap();
        let c = class_centroids(&map);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].label, 1);
        assert_eq!(c[0].pixel_count, 4);
        assert_eq!((c[0].row, c[0].col), (0.5, 0.5));
        assert_eq!((c[1].row, c[1].col), (0.5, 2.0));
    }

    #[test]
    fn small_label_goes_to_nearest_centroid_per_pixel() {
        // Two large facets left and right, a thin noisy column in between.
        let (w, h) = (9, 4);
        let mut data = vec![0u8; w * h];
        for row in 0..h {
            for col in 0..w {
                data[row * w + col] = match col {
                    0..=3 => 1,
                    4 => 3,
                    _ => 2,
                };
            }
        }
        let map = ClassMap::new(w, h, data).unwrap();
        let result = clean_class_map(&map, 6, &options(10));
        assert_eq!(result.reassigned_labels, vec![3]);
        assert_eq!(result.reassigned_pixels, 4);
        // Centroid of label 1 sits at col 1.5, label 2 at col 6.5: col 4 is
        // equidistant, so the lower label wins.
        for row in 0..h {
            assert_eq!(result.map.get(row, 4), 1);
        }
        assert_eq!(map.get(0, 4), 3, "input map must stay untouched");
    }

    #[test]
    fn background_is_never_a_target_nor_reassigned() {
        let (w, h) = (6, 6);
        let mut data = vec![6u8; w * h];
        for row in 0..3 {
            for col in 0..3 {
                data[row * w + col] = 1;
            }
        }
        data[5 * w + 5] = 4;
        let map = ClassMap::new(w, h, data).unwrap();
        let result = clean_class_map(&map, 6, &options(5));
        assert_eq!(result.target_labels, vec![1]);
        assert_eq!(result.map.get(5, 5), 1);
        assert_eq!(result.map.get(4, 4), 6);
    }

    #[test]
    fn flagged_label_is_reassigned_even_when_large() {
        let map = ClassMap::new(4, 1, vec![1, 1, 5, 5]).unwrap();
        let opts = CleanupOptions {
            min_region_size: 1,
            always_reassign: vec![5],
        };
        let result = clean_class_map(&map, 6, &opts);
        assert_eq!(result.map.labels(), &[1, 1, 1, 1]);
    }

    #[test]
    fn without_targets_pixels_keep_their_label() {
        let map = ClassMap::new(3, 1, vec![1, 2, 3]).unwrap();
        let result = clean_class_map(&map, 6, &options(100));
        assert_eq!(result.map, map);
        assert_eq!(result.unassignable_pixels, 3);
        assert_eq!(result.reassigned_pixels, 0);
    }
}
