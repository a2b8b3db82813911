//! Row-parallel fill helper.
//!
//! Rows are independent in every per-pixel pass of the pipeline, so the
//! `parallel` feature hands them to Rayon. Output is identical either way.

/// Call `f(row, row_slice)` for each `width`-sized row of `data`.
pub(crate) fn fill_rows<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, dst)| f(row, dst));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (row, dst) in data.chunks_mut(width).enumerate() {
            f(row, dst);
        }
    }
}
