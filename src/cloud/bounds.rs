use crate::types::CloudPoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a point cloud.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCloudBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl PointCloudBounds {
    /// `None` for an empty cloud.
    pub fn from_points(points: &[CloudPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min: [first.x, first.y, first.z],
            max: [first.x, first.y, first.z],
        };
        for p in &points[1..] {
            for (axis, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                bounds.min[axis] = bounds.min[axis].min(v);
                bounds.max[axis] = bounds.max[axis].max(v);
            }
        }
        Some(bounds)
    }

    /// Midpoint of the height range.
    pub fn mid_z(&self) -> f64 {
        self.max[2] - (self.max[2] - self.min[2]) / 2.0
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            min_x: self.min[0],
            min_y: self.min[1],
            max_x: self.max[0],
            max_y: self.max[1],
        }
    }
}

/// Planar bounding box of a building footprint in the cloud's CRS.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Footprint {
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Points whose planar position lies inside `footprint` (edges included).
pub fn crop_to_footprint(points: &[CloudPoint], footprint: &Footprint) -> Vec<CloudPoint> {
    points
        .iter()
        .filter(|p| footprint.contains(p.x, p.y))
        .copied()
        .collect()
}
