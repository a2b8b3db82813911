//! Pixel → geographic → projected coordinate handling.
//!
//! - [`affine`]: the raster's pixel-to-CRS affine map.
//! - [`crs`]: supported reference systems, keyed by EPSG code.
//! - [`projection`]: Gauss–Krüger transverse Mercator (forward and inverse).
//! - [`mapper`]: the two-stage transform applied to sampled corners.

pub mod affine;
pub mod crs;
pub mod mapper;
pub mod projection;

pub use affine::AffineTransform;
pub use crs::Crs;
pub use mapper::{CoordinateMapper, GeoReference};
pub use projection::{Ellipsoid, Projection, TransverseMercator};
