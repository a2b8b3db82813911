use crate::cloud::Footprint;
use crate::geo::{AffineTransform, Crs, GeoReference};
use crate::reconstructor::ReconstructionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ReconstructToolConfig {
    /// Single-channel PNG with one class id per pixel.
    pub class_map: PathBuf,
    /// LAS/LAZ point cloud in the target CRS.
    pub point_cloud: PathBuf,
    pub georef: GeoRefConfig,
    /// Crop the cloud to this planar box before matching.
    #[serde(default)]
    pub footprint: Option<Footprint>,
    #[serde(default)]
    pub params: ReconstructionParams,
    pub output: ReconstructOutputConfig,
}

/// Raster geo-referencing: either a GDAL geotransform or the raster's
/// `[west, south, east, north]` bounds.
#[derive(Debug, Deserialize)]
pub struct GeoRefConfig {
    #[serde(default)]
    pub transform: Option<[f64; 6]>,
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,
    #[serde(default = "default_source_epsg")]
    pub source_epsg: u32,
    #[serde(default = "default_target_epsg")]
    pub target_epsg: u32,
}

fn default_source_epsg() -> u32 {
    4326
}

fn default_target_epsg() -> u32 {
    3006
}

impl GeoRefConfig {
    pub fn to_reference(&self, width: usize, height: usize) -> Result<GeoReference, String> {
        let transform = match (self.transform, self.bounds) {
            (Some(gt), None) => AffineTransform::from_gdal(gt),
            (None, Some([west, south, east, north])) => {
                AffineTransform::from_bounds(west, south, east, north, width, height)
            }
            (Some(_), Some(_)) => {
                return Err("georef: give either `transform` or `bounds`, not both".to_string())
            }
            (None, None) => return Err("georef: missing `transform` or `bounds`".to_string()),
        };
        let source = Crs::from_epsg(self.source_epsg).map_err(|e| format!("georef source: {e}"))?;
        let target = Crs::from_epsg(self.target_epsg).map_err(|e| format!("georef target: {e}"))?;
        Ok(GeoReference::new(transform, source, target))
    }
}

#[derive(Debug, Deserialize)]
pub struct ReconstructOutputConfig {
    pub report_json: PathBuf,
    /// Optional PNG of the cleaned class map.
    #[serde(default)]
    pub cleaned_map: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ReconstructToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<ReconstructToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_config_builds_reference() {
        let cfg = parse_config(
            r#"{
                "class_map": "roof.png",
                "point_cloud": "roof.laz",
                "georef": { "bounds": [18.0, 59.0, 18.001, 59.0005] },
                "params": { "sampler": { "offset": 12 } },
                "output": { "report_json": "out/report.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.params.sampler.offset, 12);
        assert!(cfg.footprint.is_none());
        let georef = cfg.georef.to_reference(100, 50).unwrap();
        assert_eq!(georef.source, Crs::Wgs84Geographic);
        assert_eq!(georef.target, Crs::Sweref99Tm);
        assert_eq!(georef.transform.c, 18.0);
        assert_eq!(georef.transform.f, 59.0005);
    }

    #[test]
    fn conflicting_or_missing_transform_is_rejected() {
        let both = GeoRefConfig {
            transform: Some([0.0, 1.0, 0.0, 0.0, 0.0, -1.0]),
            bounds: Some([0.0, 0.0, 1.0, 1.0]),
            source_epsg: 4326,
            target_epsg: 3006,
        };
        assert!(both.to_reference(1, 1).is_err());
        let neither = GeoRefConfig {
            transform: None,
            bounds: None,
            source_epsg: 4326,
            target_epsg: 3006,
        };
        assert!(neither.to_reference(1, 1).is_err());
        let bad_crs = GeoRefConfig {
            transform: Some([0.0, 1.0, 0.0, 0.0, 0.0, -1.0]),
            bounds: None,
            source_epsg: 9999,
            target_epsg: 3006,
        };
        assert!(bad_crs.to_reference(1, 1).unwrap_err().contains("9999"));
    }
}
