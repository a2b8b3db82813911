//! Row-major raster access shared by label grids and float buffers.
//!
//! Coordinates follow the raster convention used throughout the crate:
//! `row` indexes the vertical axis, `col` the horizontal one.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, row: usize) -> &[Self::Pixel];

    /// Whether a signed pixel coordinate lies inside the raster.
    #[inline]
    fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }
}
