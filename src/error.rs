//! Fatal error types of the reconstruction pipeline.
//!
//! Only malformed inputs and invalid configuration abort a run. Conditions
//! that merely narrow the surviving corner set are counted in
//! [`RunSummary`](crate::diagnostics::RunSummary) instead.
use thiserror::Error;

/// Inputs whose shape or geo-referencing makes the run meaningless.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputShapeError {
    /// Class map has zero width or height.
    #[error("class map is empty")]
    EmptyClassMap,
    /// Label buffer length does not match the declared dimensions.
    #[error("class map buffer holds {len} labels, expected {width}x{height}")]
    ClassMapSize {
        width: usize,
        height: usize,
        len: usize,
    },
    /// No point-cloud samples were supplied.
    #[error("point cloud is empty")]
    EmptyPointCloud,
    /// Raster affine transform cannot be inverted or is not finite.
    #[error("raster transform is degenerate")]
    DegenerateTransform,
    /// Raster transform places the map outside the source CRS domain.
    #[error("raster extent {extent:?} is outside the domain of {crs}")]
    CrsMismatch { crs: String, extent: [f64; 4] },
    /// EPSG code without a built-in projection.
    #[error("unsupported coordinate reference system EPSG:{0}")]
    UnsupportedCrs(u32),
    /// Target CRS must be projected (metric) for elevation matching.
    #[error("target CRS {0} is not a projected system")]
    TargetNotProjected(String),
}

#[derive(Debug, Error)]
pub enum ReconstructionError {
    #[error("invalid input: {0}")]
    InputShape(#[from] InputShapeError),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ReconstructionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
