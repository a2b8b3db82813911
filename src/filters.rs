//! Separable 1D kernels and the clamped separable convolution that applies them.
//!
//! Kernels are applied as correlation: `out[i] = Σ taps[k] · in[i + k - r]`
//! with `r = taps.len() / 2`. Border samples replicate the edge pixel.
use crate::image::rows::fill_rows;
use crate::image::ImageF32;
use serde::Serialize;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). Odd length is assumed so
    /// that the kernel has a well-defined centre.
    fn taps(&self) -> &[f32];
}

/// Owned kernel taps, built at runtime from the configured sizes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KernelTaps {
    taps: Vec<f32>,
}

impl KernelTaps {
    pub fn new(taps: Vec<f32>) -> Self {
        Self { taps }
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl SeparableFilter for KernelTaps {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Normalised Gaussian taps of odd `size`.
///
/// A non-positive `sigma` is derived from the window size with the usual
/// `0.3·((size−1)/2 − 1) + 0.8` rule.
pub fn gaussian_taps(size: usize, sigma: f32) -> KernelTaps {
    let size = size.max(1) | 1;
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let radius = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    KernelTaps::new(taps)
}

/// Binomial smoothing taps of odd `ksize`, normalised to unit sum.
///
/// Together with [`sobel_derivative_taps`] this forms the separable Sobel
/// operator of aperture `ksize`.
pub fn sobel_smoothing_taps(ksize: usize) -> KernelTaps {
    let mut taps = vec![1.0f32];
    for _ in 1..ksize {
        taps = convolve_1d(&taps, &[1.0, 1.0]);
    }
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    KernelTaps::new(taps)
}

/// First-derivative taps of odd `ksize` (binomial of order `ksize − 2`
/// convolved with a central difference).
///
/// Scaled so that a unit step produces a unit response; the classic integer
/// kernel is a constant multiple of this one.
pub fn sobel_derivative_taps(ksize: usize) -> KernelTaps {
    let mut taps = vec![1.0f32];
    for _ in 3..ksize {
        taps = convolve_1d(&taps, &[1.0, 1.0]);
    }
    taps = convolve_1d(&taps, &[-1.0, 0.0, 1.0]);
    let positive: f32 = taps.iter().filter(|&&t| t > 0.0).sum();
    let scale = if positive > 0.0 { 0.5 / positive } else { 1.0 };
    for t in &mut taps {
        *t *= scale;
    }
    KernelTaps::new(taps)
}

fn convolve_1d(a: &[f32], b: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Apply `row_filter` along columns (horizontal pass) and then `col_filter`
/// along rows (vertical pass).
pub fn apply_separable(
    src: &ImageF32,
    row_filter: &dyn SeparableFilter,
    col_filter: &dyn SeparableFilter,
) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return horiz;
    }

    let taps = row_filter.taps();
    let radius = (taps.len() / 2) as isize;
    fill_rows(&mut horiz.data, w, |row, dst| {
        let src_row = &src.data[row * src.stride..row * src.stride + w];
        for (col, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(col as isize + k as isize - radius, w);
                acc += tap * src_row[sx];
            }
            *px = acc;
        }
    });

    let taps = col_filter.taps();
    let radius = (taps.len() / 2) as isize;
    let mut out = ImageF32::new(w, h);
    fill_rows(&mut out.data, w, |row, dst| {
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(row as isize + k as isize - radius, h);
            let src_row = &horiz.data[sy * w..(sy + 1) * w];
            for (px, &v) in dst.iter_mut().zip(src_row) {
                *px += tap * v;
            }
        }
    });
    out
}

/// Apply the same filter along both axes.
pub fn blur(src: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    apply_separable(src, filter, filter)
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 || idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
