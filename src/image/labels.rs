//! Owned label grid produced by the external roof classifier.
//!
//! Each pixel carries a small class id. One id is reserved as the
//! background/NODATA value; it is not stored here but passed alongside the
//! map by the stages that need it.
use super::f32::ImageF32;
use super::traits::ImageView;
use crate::error::InputShapeError;

/// Class id of a roof facet (or the background value).
pub type FacetLabel = u8;

/// Number of distinct values a [`FacetLabel`] can take.
pub const LABEL_COUNT: usize = FacetLabel::MAX as usize + 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassMap {
    w: usize,
    h: usize,
    data: Vec<FacetLabel>,
}

impl ClassMap {
    /// Wrap a row-major label buffer of `width × height` pixels.
    pub fn new(
        width: usize,
        height: usize,
        data: Vec<FacetLabel>,
    ) -> Result<Self, InputShapeError> {
        if width == 0 || height == 0 {
            return Err(InputShapeError::EmptyClassMap);
        }
        if data.len() != width * height {
            return Err(InputShapeError::ClassMapSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            w: width,
            h: height,
            data,
        })
    }

    /// Map of `width × height` pixels all carrying `label`.
    ///
    /// Unlike [`ClassMap::new`] this accepts zero dimensions; an empty map is
    /// rejected when it reaches the reconstructor.
    pub fn filled(width: usize, height: usize, label: FacetLabel) -> Self {
        Self {
            w: width,
            h: height,
            data: vec![label; width * height],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> FacetLabel {
        self.data[row * self.w + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, label: FacetLabel) {
        self.data[row * self.w + col] = label;
    }

    /// Label at a signed coordinate, `None` when it falls outside the map.
    #[inline]
    pub fn probe(&self, row: isize, col: isize) -> Option<FacetLabel> {
        self.contains(row, col).then(|| self.get(row as usize, col as usize))
    }

    pub fn labels(&self) -> &[FacetLabel] {
        &self.data
    }

    pub fn labels_mut(&mut self) -> &mut [FacetLabel] {
        &mut self.data
    }

    /// Float view of the labels, treating the class ids as intensities.
    pub fn to_f32(&self) -> ImageF32 {
        let data = self.data.iter().map(|&l| l as f32).collect();
        ImageF32 {
            w: self.w,
            h: self.h,
            stride: self.w,
            data,
        }
    }
}

impl ImageView for ClassMap {
    type Pixel = FacetLabel;

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
        self.w
    }
    #[inline]
    fn row(&self, row: usize) -> &[FacetLabel] {
        let start = row * self.w;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = ClassMap::new(4, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(err, InputShapeError::ClassMapSize { len: 15, .. }));
        assert!(matches!(
            ClassMap::new(0, 3, Vec::new()),
            Err(InputShapeError::EmptyClassMap)
        ));
    }

    #[test]
    fn probe_outside_bounds_is_none() {
        let map = ClassMap::filled(3, 2, 7);
        assert_eq!(map.probe(1, 2), Some(7));
        assert_eq!(map.probe(2, 0), None);
        assert_eq!(map.probe(0, -1), None);
    }
}
