//! Facet membership of corners: which labels a corner borders, and the
//! per-label point groups built from that.

pub mod grouper;
pub mod sampler;

pub use grouper::{group_facets, FacetGroups};
pub use sampler::{probe_offsets, sample_facets, SamplerOptions, SamplingResult};
