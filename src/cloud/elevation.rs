//! Corner heights from nearby point-cloud samples.
//!
//! A sample supports a corner when `|dx| < ε`, `|dy| < ε` and `z > h_min`
//! (all strict). The corner's height is the mean z of its supporters. A
//! corner without supporters has no height: it is reported in
//! [`ElevationResult::unmatched`] and left out of the 3D point set.
use super::bounds::PointCloudBounds;
use crate::types::{CloudPoint, Corner, FacetCornerPoint, MappedCorner};
use log::{debug, warn};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lower bound for the height of a roof sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightFloor {
    /// Fixed height in cloud units.
    Absolute(f64),
    /// Midpoint of the cloud's height range.
    MidRange,
}

impl HeightFloor {
    pub fn resolve(&self, bounds: &PointCloudBounds) -> f64 {
        match *self {
            HeightFloor::Absolute(h) => h,
            HeightFloor::MidRange => bounds.mid_z(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationOptions {
    /// Half-width `ε` of the square planar window, in target CRS units.
    pub tolerance: f64,
    pub height_floor: HeightFloor,
    /// Classification codes allowed to support a corner (all when `None`).
    pub classes: Option<Vec<u8>>,
}

impl Default for ElevationOptions {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            height_floor: HeightFloor::MidRange,
            classes: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ElevationResult {
    /// Matched corners in input order.
    pub points: Vec<FacetCornerPoint>,
    pub unmatched: Vec<Corner>,
    /// Resolved `h_min`.
    pub height_floor: f64,
}

fn eligible(point: &CloudPoint, classes: Option<&[u8]>) -> bool {
    classes.map_or(true, |cls| cls.contains(&point.classification))
}

fn lift(
    corner: &MappedCorner,
    cloud: &[CloudPoint],
    eps: f64,
    floor: f64,
) -> Option<FacetCornerPoint> {
    let (x, y) = (corner.projected.x, corner.projected.y);
    let mut sum = 0.0;
    let mut support = 0usize;
    for p in cloud {
        if (p.x - x).abs() < eps && (p.y - y).abs() < eps && p.z > floor {
            sum += p.z;
            support += 1;
        }
    }
    (support > 0).then(|| FacetCornerPoint {
        position: Point3::new(x, y, sum / support as f64),
        labels: corner.association.labels(),
        support,
        corner: corner.association.corner,
    })
}

/// Assign heights to `corners`. `cloud` must be non-empty; the caller
/// rejects empty clouds before this stage.
pub fn match_elevations(
    corners: &[MappedCorner],
    cloud: &[CloudPoint],
    options: &ElevationOptions,
) -> ElevationResult {
    let classes = options.classes.as_deref();
    let filtered: Vec<CloudPoint>;
    let cloud: &[CloudPoint] = if classes.is_some() {
        filtered = cloud.iter().filter(|p| eligible(p, classes)).copied().collect();
        &filtered
    } else {
        cloud
    };

    let Some(bounds) = PointCloudBounds::from_points(cloud) else {
        warn!("elevation: no eligible cloud samples, every corner is unmatched");
        return ElevationResult {
            points: Vec::new(),
            unmatched: corners.iter().map(|c| c.association.corner).collect(),
            height_floor: f64::NAN,
        };
    };
    let floor = options.height_floor.resolve(&bounds);
    let eps = options.tolerance;

    #[cfg(feature = "parallel")]
    let lifted: Vec<Option<FacetCornerPoint>> =
        corners.par_iter().map(|c| lift(c, cloud, eps, floor)).collect();
    #[cfg(not(feature = "parallel"))]
    let lifted: Vec<Option<FacetCornerPoint>> =
        corners.iter().map(|c| lift(c, cloud, eps, floor)).collect();

    let mut result = ElevationResult {
        height_floor: floor,
        ..Default::default()
    };
    for (corner, point) in corners.iter().zip(lifted) {
        match point {
            Some(p) => result.points.push(p),
            None => result.unmatched.push(corner.association.corner),
        }
    }

    if !result.unmatched.is_empty() {
        warn!(
            "elevation: {} of {} corners have no cloud support within {} (h_min {:.3})",
            result.unmatched.len(),
            corners.len(),
            eps,
            floor
        );
    }
    debug!(
        "elevation: {} corners lifted from {} samples",
        result.points.len(),
        cloud.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FacetAssociation, FacetProbe, GeoPoint};
    use approx::assert_relative_eq;

    fn mapped(x: f64, y: f64) -> MappedCorner {
        MappedCorner {
            association: FacetAssociation {
                corner: Corner::new(0, 0, 1.0),
                probes: vec![FacetProbe {
                    label: 2,
                    row: 0,
                    col: 0,
                }],
            },
            geographic: GeoPoint::new(0.0, 0.0),
            projected: GeoPoint::new(x, y),
            projected_probes: Vec::new(),
        }
    }

    fn absolute(floor: f64) -> ElevationOptions {
        ElevationOptions {
            tolerance: 1.0,
            height_floor: HeightFloor::Absolute(floor),
            classes: None,
        }
    }

    #[test]
    fn height_is_mean_of_supporting_samples() {
        let cloud = [
            CloudPoint::new(10.5, 20.0, 12.0, 6),
            CloudPoint::new(9.5, 20.5, 14.0, 6),
            CloudPoint::new(10.0, 20.0, 1.0, 2),
            CloudPoint::new(30.0, 20.0, 13.0, 6),
        ];
        let result = match_elevations(&[mapped(10.0, 20.0)], &cloud, &absolute(5.0));
        assert_eq!(result.points.len(), 1);
        let p = &result.points[0];
        assert_relative_eq!(p.position.z, 13.0);
        assert_eq!(p.support, 2);
        assert_eq!(p.labels, vec![2]);
        assert_relative_eq!(p.position.x, 10.0);
    }

    #[test]
    fn window_and_floor_are_strict() {
        let cloud = [
            CloudPoint::new(11.0, 20.0, 12.0, 6),
            CloudPoint::new(10.0, 20.0, 5.0, 6),
        ];
        let result = match_elevations(&[mapped(10.0, 20.0)], &cloud, &absolute(5.0));
        assert!(result.points.is_empty());
        assert_eq!(result.unmatched.len(), 1);
    }

    #[test]
    fn mid_range_floor_excludes_ground_returns() {
        let cloud = [
            CloudPoint::new(0.0, 0.0, 0.0, 2),
            CloudPoint::new(0.2, 0.0, 2.0, 2),
            CloudPoint::new(0.1, 0.1, 10.0, 6),
        ];
        let result = match_elevations(&[mapped(0.0, 0.0)], &cloud, &ElevationOptions::default());
        assert_relative_eq!(result.height_floor, 5.0);
        assert_relative_eq!(result.points[0].position.z, 10.0);
    }

    #[test]
    fn class_whitelist_filters_samples() {
        let cloud = [
            CloudPoint::new(0.0, 0.0, 8.0, 6),
            CloudPoint::new(0.0, 0.0, 20.0, 5),
        ];
        let opts = ElevationOptions {
            classes: Some(vec![6]),
            ..absolute(0.0)
        };
        let result = match_elevations(&[mapped(0.0, 0.0)], &cloud, &opts);
        assert_relative_eq!(result.points[0].position.z, 8.0);

        let none = ElevationOptions {
            classes: Some(vec![9]),
            ..absolute(0.0)
        };
        let result = match_elevations(&[mapped(0.0, 0.0)], &cloud, &none);
        assert_eq!(result.unmatched.len(), 1);
    }
}
