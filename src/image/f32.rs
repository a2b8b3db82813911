//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Used for every numeric intermediate of the corner detector: the label
//! image itself, gradients, second-moment products and the response map.
use super::traits::ImageView;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: f32) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// Largest finite value, or `None` for an empty/all-NaN buffer.
    pub fn max_value(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f32| m.max(v))))
    }

    /// Element-wise product of two equally sized buffers.
    pub fn product(&self, other: &ImageF32) -> ImageF32 {
        debug_assert_eq!((self.w, self.h), (other.w, other.h));
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .collect();
        ImageF32 {
            w: self.w,
            h: self.h,
            stride: self.w,
            data,
        }
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, row: usize) -> &[f32] {
        let start = row * self.stride;
        &self.data[start..start + self.w]
    }
}
