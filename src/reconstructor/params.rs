//! Parameter types configuring the reconstruction stages.
//!
//! Defaults match the roof classifier the pipeline was tuned for: background
//! label 6, ambiguous class 5, 0.25 m class-map pixels and a metric cloud.
use crate::cleanup::CleanupOptions;
use crate::cloud::{ElevationOptions, HeightFloor};
use crate::corners::{DedupOptions, HarrisOptions};
use crate::error::ReconstructionError;
use crate::facets::SamplerOptions;
use crate::image::FacetLabel;
use serde::{Deserialize, Serialize};

/// Largest Sobel aperture accepted for the derivative kernel.
pub const MAX_DERIVATIVE_KSIZE: usize = 31;

/// Largest probe distance that still fits a signed pixel offset.
pub const MAX_SAMPLER_OFFSET: usize = isize::MAX as usize;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionParams {
    /// Label value marking NODATA / non-roof pixels.
    pub background: FacetLabel,
    pub cleanup: CleanupOptions,
    pub harris: HarrisOptions,
    pub dedup: DedupOptions,
    pub sampler: SamplerOptions,
    pub elevation: ElevationOptions,
}

impl Default for ReconstructionParams {
    fn default() -> Self {
        Self {
            background: 6,
            cleanup: CleanupOptions::default(),
            harris: HarrisOptions::default(),
            dedup: DedupOptions::default(),
            sampler: SamplerOptions::default(),
            elevation: ElevationOptions::default(),
        }
    }
}

impl ReconstructionParams {
    pub fn validate(&self) -> Result<(), ReconstructionError> {
        let h = &self.harris;
        let ksize = h.derivative_ksize;
        if ksize % 2 == 0 || !(3..=MAX_DERIVATIVE_KSIZE).contains(&ksize) {
            return Err(ReconstructionError::invalid(
                "harris.derivative_ksize",
                format!("must be odd and in 3..={MAX_DERIVATIVE_KSIZE}, got {ksize}"),
            ));
        }
        if h.blur_size % 2 == 0 {
            return Err(ReconstructionError::invalid(
                "harris.blur_size",
                format!("must be odd, got {}", h.blur_size),
            ));
        }
        if !h.blur_sigma.is_finite() {
            return Err(ReconstructionError::invalid("harris.blur_sigma", "must be finite"));
        }
        if !(h.k.is_finite() && h.k > 0.0) {
            return Err(ReconstructionError::invalid(
                "harris.k",
                format!("must be positive, got {}", h.k),
            ));
        }
        if !(h.threshold > 0.0 && h.threshold < 1.0) {
            return Err(ReconstructionError::invalid(
                "harris.threshold",
                format!("must lie in (0, 1), got {}", h.threshold),
            ));
        }
        if self.sampler.offset == 0 {
            return Err(ReconstructionError::invalid("sampler.offset", "must be at least 1 px"));
        }
        let offset = self.sampler.offset;
        if offset > MAX_SAMPLER_OFFSET {
            return Err(ReconstructionError::invalid(
                "sampler.offset",
                format!("must not exceed {MAX_SAMPLER_OFFSET} px, got {offset}"),
            ));
        }
        let e = &self.elevation;
        if !(e.tolerance.is_finite() && e.tolerance > 0.0) {
            return Err(ReconstructionError::invalid(
                "elevation.tolerance",
                format!("must be positive, got {}", e.tolerance),
            ));
        }
        if let HeightFloor::Absolute(v) = e.height_floor {
            if !v.is_finite() {
                return Err(ReconstructionError::invalid(
                    "elevation.height_floor",
                    "absolute floor must be finite",
                ));
            }
        }
        if self.cleanup.always_reassign.contains(&self.background) {
            return Err(ReconstructionError::invalid(
                "cleanup.always_reassign",
                format!("must not contain the background label {}", self.background),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ReconstructionParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_even_kernels_and_bad_threshold() {
        let mut p = ReconstructionParams::default();
        p.harris.derivative_ksize = 4;
        let err = p.validate().unwrap_err();
        assert!(matches!(
            err,
            ReconstructionError::InvalidParameter {
                name: "harris.derivative_ksize",
                ..
            }
        ));

        let mut p = ReconstructionParams::default();
        p.harris.threshold = 1.0;
        assert!(p.validate().is_err());

        let mut p = ReconstructionParams::default();
        p.elevation.tolerance = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn sampler_offset_must_fit_a_signed_pixel_offset() {
        let mut p = ReconstructionParams::default();
        p.sampler.offset = MAX_SAMPLER_OFFSET;
        assert!(p.validate().is_ok());

        for offset in [0, MAX_SAMPLER_OFFSET + 1, usize::MAX] {
            p.sampler.offset = offset;
            assert!(matches!(
                p.validate(),
                Err(ReconstructionError::InvalidParameter {
                    name: "sampler.offset",
                    ..
                })
            ));
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "dedup": { "radius": 4 },
            "elevation": { "height_floor": { "absolute": 3.5 } }
        }"#;
        let p: ReconstructionParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.dedup.radius, 4);
        assert_eq!(p.sampler.offset, 20);
        assert_eq!(p.elevation.height_floor, HeightFloor::Absolute(3.5));
        assert_eq!(p.background, 6);
    }
}
