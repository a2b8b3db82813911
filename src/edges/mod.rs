//! Image gradients used by the corner detector.
//!
//! The class map is treated as a scalar image; its gradients are non-zero
//! only along facet boundaries, which is what the second-moment operator
//! in [`crate::corners`] builds on.

pub mod grad;

pub use grad::{sobel_gradients, Grad};
