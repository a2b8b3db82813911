//! Harris-style cornerness over a label image.
//!
//! For every pixel the smoothed structure tensor
//!
//! ```text
//!     | Sxx  Sxy |
//! M = |          |      Sxx = G * Ix², Syy = G * Iy², Sxy = G * Ix·Iy
//!     | Sxy  Syy |
//! ```
//!
//! is formed from Sobel derivatives and a Gaussian window `G`, and scored as
//! `det(M) − k·trace(M)²`. Candidates are the pixels whose response exceeds
//! `threshold · max(response)`, emitted in raster order.
//!
//! The response map is computed in full before thresholding; rows are
//! independent and run in parallel with the `parallel` feature.
use crate::edges::sobel_gradients;
use crate::filters::{blur, gaussian_taps};
use crate::image::rows::fill_rows;
use crate::image::{ClassMap, ImageF32, ImageView};
use crate::types::Corner;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A peak response at or below this is treated as a flat map.
const MIN_PEAK_RESPONSE: f32 = 1e-9;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HarrisOptions {
    /// Sobel aperture (odd, 3..=31).
    pub derivative_ksize: usize,
    /// Gaussian window size (odd).
    pub blur_size: usize,
    /// Gaussian sigma; non-positive derives it from `blur_size`.
    pub blur_sigma: f32,
    /// Trace weighting constant `k`.
    pub k: f32,
    /// Relative threshold `τ` in (0, 1).
    pub threshold: f32,
}

impl Default for HarrisOptions {
    fn default() -> Self {
        Self {
            derivative_ksize: 9,
            blur_size: 3,
            blur_sigma: 1.0,
            k: 0.15,
            threshold: 1e-4,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HarrisResult {
    pub response: ImageF32,
    pub max_response: f32,
    pub candidates: Vec<Corner>,
    pub elapsed_ms: f64,
}

/// Full cornerness map of a scalar image.
pub fn harris_response(image: &ImageF32, options: &HarrisOptions) -> ImageF32 {
    let grad = sobel_gradients(image, options.derivative_ksize);
    let (ixx, iyy, ixy) = grad.second_moments();
    let window = gaussian_taps(options.blur_size, options.blur_sigma);
    let sxx = blur(&ixx, &window);
    let syy = blur(&iyy, &window);
    let sxy = blur(&ixy, &window);

    let k = options.k;
    let w = image.width();
    let mut response = ImageF32::new(w, image.height());
    fill_rows(&mut response.data, w, |row, dst| {
        let (a_row, b_row, c_row) = (sxx.row(row), syy.row(row), sxy.row(row));
        for (col, px) in dst.iter_mut().enumerate() {
            let (a, b, c) = (a_row[col], b_row[col], c_row[col]);
            let det = a * b - c * c;
            let trace = a + b;
            *px = det - k * trace * trace;
        }
    });
    response
}

/// Pixels with `response > threshold · max(response)`, in raster order.
pub fn threshold_response(response: &ImageF32, threshold: f32) -> Vec<Corner> {
    let Some(max) = response.max_value() else {
        return Vec::new();
    };
    if max <= MIN_PEAK_RESPONSE {
        return Vec::new();
    }
    let cut = threshold * max;
    let mut corners = Vec::new();
    for row in 0..response.h {
        for (col, &v) in response.row(row).iter().enumerate() {
            if v > cut {
                corners.push(Corner::new(row, col, v));
            }
        }
    }
    corners
}

/// Run the detector on a class map, treating labels as intensities.
pub fn detect_corners(map: &ClassMap, options: &HarrisOptions) -> HarrisResult {
    let start = Instant::now();
    let response = harris_response(&map.to_f32(), options);
    let max_response = response.max_value().unwrap_or(0.0);
    let candidates = threshold_response(&response, options.threshold);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "harris: {} candidates above {:.2e} x max {:.3e} ({:.2} ms)",
        candidates.len(),
        options.threshold,
        max_response,
        elapsed_ms
    );
    HarrisResult {
        response,
        max_response,
        candidates,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> HarrisOptions {
        HarrisOptions {
            derivative_ksize: 3,
            blur_size: 3,
            blur_sigma: 1.0,
            k: 0.04,
            threshold: 0.5,
        }
    }

    #[test]
    fn flat_map_has_no_candidates() {
        let map = ClassMap::filled(12, 9, 3);
        let result = detect_corners(&map, &opts());
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn straight_boundary_is_not_a_corner() {
        let mut map = ClassMap::filled(12, 12, 1);
        for row in 6..12 {
            for col in 0..12 {
                map.set(row, col, 2);
            }
        }
        let result = detect_corners(&map, &opts());
        assert!(
            result.candidates.is_empty(),
            "edge pixels must score negative, got {:?}",
            result.candidates
        );
    }

    #[test]
    fn l_shaped_junction_peaks_at_the_vertex() {
        let mut map = ClassMap::filled(10, 10, 2);
        for row in 0..5 {
            for col in 0..5 {
                map.set(row, col, 1);
            }
        }
        let result = detect_corners(&map, &opts());
        let best = result
            .candidates
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .expect("corner expected");
        assert_eq!((best.row, best.col), (4, 4));
        assert!(result
            .candidates
            .windows(2)
            .all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)));
    }
}
