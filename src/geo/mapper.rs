//! Pixel → geographic → projected mapping of sampled corners.
//!
//! The raster affine first takes a pixel `(row, col)` into the raster's own
//! CRS. Coordinates are then brought to WGS84 degrees (inverse projection if
//! the raster is projected) and finally forward-projected into the target
//! system, whose metric units are shared with the point cloud.
use super::affine::AffineTransform;
use super::crs::Crs;
use super::projection::Projection;
use crate::error::InputShapeError;
use crate::types::{FacetAssociation, GeoPoint, MappedCorner};
use log::debug;
use serde::{Deserialize, Serialize};

fn default_source() -> Crs {
    Crs::Wgs84Geographic
}

fn default_target() -> Crs {
    Crs::Sweref99Tm
}

/// Geo-referencing of a class map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoReference {
    pub transform: AffineTransform,
    #[serde(default = "default_source")]
    pub source: Crs,
    #[serde(default = "default_target")]
    pub target: Crs,
}

impl GeoReference {
    pub fn new(transform: AffineTransform, source: Crs, target: Crs) -> Self {
        Self {
            transform,
            source,
            target,
        }
    }
}

#[derive(Debug)]
pub struct CoordinateMapper {
    transform: AffineTransform,
    source: Crs,
    target: Crs,
    source_projection: Option<Box<dyn Projection>>,
    target_projection: Box<dyn Projection>,
}

impl CoordinateMapper {
    pub fn new(
        transform: AffineTransform,
        source: Crs,
        target: Crs,
    ) -> Result<Self, InputShapeError> {
        if transform.is_degenerate() {
            return Err(InputShapeError::DegenerateTransform);
        }
        let target_projection = target
            .projection()
            .ok_or_else(|| InputShapeError::TargetNotProjected(target.to_string()))?;
        Ok(Self {
            transform,
            source,
            target,
            source_projection: source.projection(),
            target_projection,
        })
    }

    pub fn from_reference(georef: &GeoReference) -> Result<Self, InputShapeError> {
        Self::new(georef.transform, georef.source, georef.target)
    }

    pub fn source(&self) -> Crs {
        self.source
    }

    pub fn target(&self) -> Crs {
        self.target
    }

    /// Check that a `width × height` raster lands inside the source CRS
    /// domain. Returns the extent `[min_x, min_y, max_x, max_y]`.
    pub fn validate_extent(
        &self,
        width: usize,
        height: usize,
    ) -> Result<[f64; 4], InputShapeError> {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.transform.apply(0.0, 0.0),
            self.transform.apply(0.0, w),
            self.transform.apply(h, 0.0),
            self.transform.apply(h, w),
        ];
        let mut extent = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
        for p in &corners {
            extent[0] = extent[0].min(p.x);
            extent[1] = extent[1].min(p.y);
            extent[2] = extent[2].max(p.x);
            extent[3] = extent[3].max(p.y);
        }

        let finite = extent.iter().all(|v| v.is_finite());
        let in_domain = match self.source {
            Crs::Wgs84Geographic => {
                extent[0] >= -180.0 && extent[2] <= 180.0 && extent[1] >= -90.0 && extent[3] <= 90.0
            }
            _ => true,
        };
        if !finite || !in_domain {
            return Err(InputShapeError::CrsMismatch {
                crs: self.source.to_string(),
                extent,
            });
        }
        Ok(extent)
    }

    /// WGS84 `(lon, lat)` of a fractional pixel position.
    pub fn pixel_to_geographic(&self, row: f64, col: f64) -> GeoPoint {
        let native = self.transform.apply(row, col);
        match &self.source_projection {
            Some(projection) => projection.inverse(native),
            None => native,
        }
    }

    pub fn geographic_to_target(&self, geographic: GeoPoint) -> GeoPoint {
        self.target_projection.forward(geographic)
    }

    /// Target-CRS coordinates of a fractional pixel position.
    pub fn pixel_to_target(&self, row: f64, col: f64) -> GeoPoint {
        self.geographic_to_target(self.pixel_to_geographic(row, col))
    }

    /// Map every association, one output per input in the same order. Probe
    /// pixels are carried along so their planar positions stay available.
    pub fn map_associations(&self, associations: Vec<FacetAssociation>) -> Vec<MappedCorner> {
        let mapped: Vec<MappedCorner> = associations
            .into_iter()
            .map(|association| {
                let corner = association.corner;
                let geographic = self.pixel_to_geographic(corner.row as f64, corner.col as f64);
                let projected = self.geographic_to_target(geographic);
                let projected_probes = association
                    .probes
                    .iter()
                    .map(|p| self.pixel_to_target(p.row as f64, p.col as f64))
                    .collect();
                MappedCorner {
                    association,
                    geographic,
                    projected,
                    projected_probes,
                }
            })
            .collect();
        debug!(
            "mapper: {} corners mapped {} -> {}",
            mapped.len(),
            self.source,
            self.target
        );
        mapped
    }
}
