//! Greedy suppression of near-duplicate corner candidates.
//!
//! Candidates are visited once in scan order. A candidate is dropped when an
//! already kept corner lies inside its `(2r+1)×(2r+1)` window, i.e. both
//! `|Δrow| <= r` and `|Δcol| <= r`; otherwise it is kept. First seen wins, so
//! the output depends on the scan order: raster order favours the top-left
//! pixel of a cluster, `ResponseDescending` its strongest pixel.
//!
//! The kept list is scanned linearly (O(n²) overall), which is fine for the
//! tens of corners a single roof produces. Alternative strategies plug in
//! through [`CornerDeduplicator`].
use crate::types::Corner;
use serde::{Deserialize, Serialize};

/// Order in which candidates are offered to the greedy scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Detector output order (row-major).
    #[default]
    Raster,
    /// Strongest response first; equal responses keep raster order.
    ResponseDescending,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    /// Merge radius `r` in pixels.
    pub radius: usize,
    pub order: ScanOrder,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            radius: 10,
            order: ScanOrder::Raster,
        }
    }
}

/// Reduces a candidate list to corners that are pairwise farther apart than
/// some radius.
pub trait CornerDeduplicator {
    fn deduplicate(&self, candidates: &[Corner]) -> Vec<Corner>;
}

/// Square-window, first-seen-wins deduplication.
#[derive(Clone, Debug)]
pub struct WindowDeduplicator {
    options: DedupOptions,
}

impl WindowDeduplicator {
    pub fn new(options: DedupOptions) -> Self {
        Self { options }
    }

    fn conflicts(&self, a: &Corner, b: &Corner) -> bool {
        let r = self.options.radius;
        a.row.abs_diff(b.row) <= r && a.col.abs_diff(b.col) <= r
    }
}

impl CornerDeduplicator for WindowDeduplicator {
    fn deduplicate(&self, candidates: &[Corner]) -> Vec<Corner> {
        let mut ordered: Vec<&Corner> = candidates.iter().collect();
        if self.options.order == ScanOrder::ResponseDescending {
            ordered.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        let mut kept: Vec<Corner> = Vec::new();
        for cand in ordered {
            if kept.iter().any(|k| self.conflicts(k, cand)) {
                continue;
            }
            kept.push(*cand);
        }
        kept
    }
}
