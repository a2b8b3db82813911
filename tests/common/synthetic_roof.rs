use roof_facets::geo::{AffineTransform, CoordinateMapper, Crs, GeoReference};
use roof_facets::image::{ClassMap, FacetLabel, ImageView};
use roof_facets::reconstructor::ReconstructionParams;
use roof_facets::types::CloudPoint;

pub const BACKGROUND: FacetLabel = 6;

/// SWEREF 99 TM origin of the synthetic rasters (Stockholm).
pub const ORIGIN: (f64, f64) = (674_000.0, 6_581_000.0);
pub const PIXEL_M: f64 = 0.5;

/// Fill the half-open box `rows × cols` with `label`.
pub fn paint(
    map: &mut ClassMap,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
    label: FacetLabel,
) {
    for row in rows {
        for col in cols.clone() {
            map.set(row, col, label);
        }
    }
}

/// 100×100 map: a 50×50 facet of label 2, a 12×12 detached facet of label 1
/// in the lower-right, and a 3×3 speck of label 3 inside the large facet.
pub fn two_roof_map() -> ClassMap {
    let mut map = ClassMap::filled(100, 100, BACKGROUND);
    paint(&mut map, 10..60, 10..60, 2);
    paint(&mut map, 75..87, 75..87, 1);
    paint(&mut map, 30..33, 30..33, 3);
    map
}

/// Parameters sized for the small synthetic maps.
pub fn small_map_params() -> ReconstructionParams {
    let mut params = ReconstructionParams::default();
    params.cleanup.min_region_size = 100;
    params.harris.derivative_ksize = 3;
    params.harris.k = 0.04;
    params.harris.threshold = 0.1;
    params.dedup.radius = 5;
    params.sampler.offset = 15;
    params
}

/// North-up SWEREF 99 TM raster with 0.5 m pixels.
pub fn sweref_georef() -> GeoReference {
    let (x0, y0) = ORIGIN;
    GeoReference::new(
        AffineTransform::new(PIXEL_M, 0.0, x0, 0.0, -PIXEL_M, y0),
        Crs::Sweref99Tm,
        Crs::Sweref99Tm,
    )
}

/// One cloud sample per pixel, placed where the georef maps the pixel.
/// Roof pixels get `roof_z(label)`, background pixels lie on the ground.
pub fn cloud_for_map(
    map: &ClassMap,
    georef: &GeoReference,
    roof_z: impl Fn(FacetLabel) -> f64,
) -> Vec<CloudPoint> {
    let mapper = CoordinateMapper::from_reference(georef).expect("valid georef");
    let mut cloud = Vec::with_capacity(map.width() * map.height());
    for row in 0..map.height() {
        for col in 0..map.width() {
            let label = map.get(row, col);
            let p = mapper.pixel_to_target(row as f64, col as f64);
            let (z, class) = if label == BACKGROUND {
                (0.0, 2)
            } else {
                (roof_z(label), 6)
            };
            cloud.push(CloudPoint::new(p.x, p.y, z, class));
        }
    }
    cloud
}

/// Cloud without the samples inside the `±eps` window around `(x, y)`.
pub fn carve_window(cloud: &[CloudPoint], x: f64, y: f64, eps: f64) -> Vec<CloudPoint> {
    cloud
        .iter()
        .filter(|p| !((p.x - x).abs() < eps && (p.y - y).abs() < eps))
        .copied()
        .collect()
}
