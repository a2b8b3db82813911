//! Global per-axis standardisation of the lifted corner set.
//!
//! Statistics are computed once over every point (population standard
//! deviation). An axis whose spread is zero is left as is instead of being
//! divided by zero; such axes are flagged in [`Normalization::degenerate`].
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Spread below which an axis counts as constant.
const MIN_STD: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalization {
    pub mean: Vector3<f64>,
    pub std: Vector3<f64>,
    pub degenerate: [bool; 3],
}

impl Normalization {
    /// `None` when `points` is empty.
    pub fn fit(points: &[Point3<f64>]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / n;
        let var = points.iter().fold(Vector3::zeros(), |acc, p| {
            let d = p.coords - mean;
            acc + d.component_mul(&d)
        }) / n;
        let std = var.map(f64::sqrt);
        let degenerate = [0usize, 1, 2].map(|axis| !(std[axis] > MIN_STD));
        Some(Self {
            mean,
            std,
            degenerate,
        })
    }

    pub fn degenerate_axes(&self) -> usize {
        self.degenerate.iter().filter(|&&d| d).count()
    }

    pub fn normalize(&self, p: &Point3<f64>) -> Point3<f64> {
        let mut out = *p;
        for axis in 0..3 {
            if !self.degenerate[axis] {
                out[axis] = (p[axis] - self.mean[axis]) / self.std[axis];
            }
        }
        out
    }

    pub fn denormalize(&self, p: &Point3<f64>) -> Point3<f64> {
        let mut out = *p;
        for axis in 0..3 {
            if !self.degenerate[axis] {
                out[axis] = p[axis] * self.std[axis] + self.mean[axis];
            }
        }
        out
    }

    pub fn apply(&self, points: &mut [Point3<f64>]) {
        for p in points.iter_mut() {
            *p = self.normalize(p);
        }
    }
}

/// Fit and apply in one go. Returns `None` (and leaves `points` alone) when
/// there is nothing to normalize.
pub fn normalize_points(points: &mut [Point3<f64>]) -> Option<Normalization> {
    let stats = Normalization::fit(points)?;
    stats.apply(points);
    debug!(
        "normalize: mean {:?}, std {:?}, degenerate axes {}",
        stats.mean.as_slice(),
        stats.std.as_slice(),
        stats.degenerate_axes()
    );
    Some(stats)
}
