use crate::image::FacetLabel;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Pixel position flagged by the corner detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Corner {
    pub row: usize,
    pub col: usize,
    /// Cornerness response at the pixel.
    pub score: f32,
}

impl Corner {
    pub fn new(row: usize, col: usize, score: f32) -> Self {
        Self { row, col, score }
    }
}

/// Pixel at which a facet label was sampled around a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetProbe {
    pub label: FacetLabel,
    pub row: usize,
    pub col: usize,
}

/// A corner and the distinct facets it borders (1 to 4, in probe order).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetAssociation {
    pub corner: Corner,
    pub probes: Vec<FacetProbe>,
}

impl FacetAssociation {
    pub fn labels(&self) -> Vec<FacetLabel> {
        self.probes.iter().map(|p| p.label).collect()
    }
}

/// Planar coordinate: `(lon, lat)` in degrees for geographic systems,
/// `(easting, northing)` in metres for projected ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Corner after the pixel → geographic → projected transform.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedCorner {
    pub association: FacetAssociation,
    pub geographic: GeoPoint,
    pub projected: GeoPoint,
    /// Probe pixels in the projected system, parallel to `association.probes`.
    pub projected_probes: Vec<GeoPoint>,
}

/// One sample of the building's point cloud.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub classification: u8,
}

impl CloudPoint {
    pub fn new(x: f64, y: f64, z: f64, classification: u8) -> Self {
        Self {
            x,
            y,
            z,
            classification,
        }
    }
}

/// 3D estimate of one roof corner.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCornerPoint {
    pub position: Point3<f64>,
    pub labels: Vec<FacetLabel>,
    /// Number of cloud samples averaged into `position.z`.
    pub support: usize,
    pub corner: Corner,
}

/// Corner points bounding one facet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetGroup {
    pub label: FacetLabel,
    pub points: Vec<Point3<f64>>,
}
