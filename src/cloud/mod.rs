//! Point-cloud side of the pipeline: extents, footprint cropping and
//! corner elevation matching.

pub mod bounds;
pub mod elevation;
pub mod io;

pub use bounds::{crop_to_footprint, Footprint, PointCloudBounds};
pub use elevation::{match_elevations, ElevationOptions, ElevationResult, HeightFloor};
