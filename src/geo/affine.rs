use crate::types::GeoPoint;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-15;

/// Raster affine transform in the GDAL/rasterio convention:
///
/// ```text
/// x = a·col + b·row + c
/// y = d·col + e·row + f
/// ```
///
/// evaluated at integer pixel coordinates (the pixel's upper-left corner).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// North-up transform covering `[west, east] × [south, north]` with a
    /// `width × height` raster.
    pub fn from_bounds(
        west: f64,
        south: f64,
        east: f64,
        north: f64,
        width: usize,
        height: usize,
    ) -> Self {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        Self::new((east - west) / w, 0.0, west, 0.0, -(north - south) / h, north)
    }

    /// From a GDAL geotransform `[c, a, b, f, d, e]`.
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        Self::new(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(self.a, self.b, self.c, self.d, self.e, self.f, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn apply(&self, row: f64, col: f64) -> GeoPoint {
        GeoPoint::new(
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// A transform whose linear part cannot be inverted maps the raster onto
    /// a line and cannot geo-reference it.
    pub fn is_degenerate(&self) -> bool {
        let det = self.a * self.e - self.b * self.d;
        !det.is_finite()
            || det.abs() <= EPS
            || ![self.c, self.f].iter().all(|v| v.is_finite())
    }

    /// Fractional `(row, col)` of a CRS coordinate.
    pub fn invert(&self, p: GeoPoint) -> Option<(f64, f64)> {
        let inv = self.matrix().try_inverse()?;
        let v = inv * Vector3::new(p.x, p.y, 1.0);
        Some((v[1], v[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounds_transform_maps_raster_corners() {
        let t = AffineTransform::from_bounds(11.0, 57.0, 11.5, 57.25, 500, 250);
        let ul = t.apply(0.0, 0.0);
        let lr = t.apply(250.0, 500.0);
        assert_relative_eq!(ul.x, 11.0);
        assert_relative_eq!(ul.y, 57.25);
        assert_relative_eq!(lr.x, 11.5);
        assert_relative_eq!(lr.y, 57.0);
    }

    #[test]
    fn invert_recovers_pixel_coordinates() {
        let t = AffineTransform::new(0.5, 0.1, 100.0, -0.05, -0.5, 200.0);
        let p = t.apply(12.0, 30.0);
        let (row, col) = t.invert(p).unwrap();
        assert_relative_eq!(row, 12.0, epsilon = 1e-9);
        assert_relative_eq!(col, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn collapsed_transform_is_degenerate() {
        assert!(AffineTransform::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0).is_degenerate());
        assert!(!AffineTransform::from_gdal([0.0, 1.0, 0.0, 0.0, 0.0, -1.0]).is_degenerate());
    }
}
