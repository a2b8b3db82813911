//! End-to-end roof reconstruction.
//!
//! Overview
//! - Cleans the class map so that only sizeable facets remain.
//! - Runs a Harris-style detector on the cleaned labels and thins the
//!   candidates with a square-window deduplication.
//! - Probes the four cardinal neighbours of each corner to find the facets
//!   it borders.
//! - Maps corners (and probe pixels) from pixels into the metric target CRS.
//! - Lifts corners to 3D with the point cloud, normalizes the surviving set
//!   and groups it per facet.
//!
//! Every stage only narrows the working set; nothing is retried. Conditions
//! that drop corners are counted in the report's
//! [`RunSummary`](crate::diagnostics::RunSummary).
//!
//! Modules
//! - [`params`]: configuration for all stages.
//! - `pipeline`: the [`RoofReconstructor`] implementation.

pub mod params;
mod pipeline;

pub use params::ReconstructionParams;
pub use pipeline::RoofReconstructor;
