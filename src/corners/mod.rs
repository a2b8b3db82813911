//! Corner candidates on the cleaned class map.
//!
//! - [`harris`]: second-moment response map and relative thresholding.
//! - [`dedup`]: greedy window suppression of near-duplicate candidates.

pub mod dedup;
pub mod harris;

pub use dedup::{CornerDeduplicator, DedupOptions, ScanOrder, WindowDeduplicator};
pub use harris::{detect_corners, harris_response, threshold_response, HarrisOptions, HarrisResult};
