use roof_facets::geo::{AffineTransform, Crs, GeoReference};
use roof_facets::image::ClassMap;
use roof_facets::types::CloudPoint;
use roof_facets::{ReconstructionParams, RoofReconstructor};

fn main() {
    env_logger::init();

    // Demo: a 200x120 px gable roof (two facets split along the ridge) inside
    // a background margin, at 0.25 m per pixel in SWEREF 99 TM.
    let (w, h) = (200usize, 120usize);
    let mut map = ClassMap::filled(w, h, 6);
    for row in 20..100 {
        for col in 30..170 {
            map.set(row, col, if row < 60 { 1 } else { 2 });
        }
    }

    let (x0, y0, px) = (674_000.0, 6_581_000.0, 0.25);
    let transform = AffineTransform::new(px, 0.0, x0, 0.0, -px, y0);
    let georef = GeoReference::new(transform, Crs::Sweref99Tm, Crs::Sweref99Tm);

    // Ridge at 8 m, eaves at 5 m, ground at 0 m.
    let mut cloud = Vec::new();
    for row in (0..h).step_by(2) {
        for col in (0..w).step_by(2) {
            let x = x0 + col as f64 * px;
            let y = y0 - row as f64 * px;
            let z = if (20..100).contains(&row) && (30..170).contains(&col) {
                8.0 - 3.0 * (row as f64 - 60.0).abs() / 40.0
            } else {
                0.0
            };
            cloud.push(CloudPoint::new(x, y, z, if z > 0.0 { 6 } else { 2 }));
        }
    }

    let reconstructor = RoofReconstructor::new(ReconstructionParams::default());
    match reconstructor.process(&map, &cloud, &georef) {
        Ok(report) => {
            for group in report.facets.iter() {
                println!("facet {}: {} corners", group.label, group.points.len());
            }
            println!(
                "corners={} unmatched={} latency_ms={:.3}",
                report.summary.facet_corners,
                report.summary.unmatched_elevations,
                report.trace.timings.total_ms
            );
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}
