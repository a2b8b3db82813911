use log::info;
use roof_facets::cloud::crop_to_footprint;
use roof_facets::cloud::io::load_point_cloud;
use roof_facets::config::reconstruct;
use roof_facets::image::io::{load_class_map, save_class_map, write_json_file};
use roof_facets::image::ImageView;
use roof_facets::RoofReconstructor;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = reconstruct::load_config(Path::new(&config_path))?;

    let map = load_class_map(&config.class_map)?;
    let georef = config.georef.to_reference(map.width(), map.height())?;
    let mut cloud = load_point_cloud(&config.point_cloud)?;
    if let Some(footprint) = &config.footprint {
        let before = cloud.len();
        cloud = crop_to_footprint(&cloud, footprint);
        info!("footprint kept {} of {} cloud points", cloud.len(), before);
    }

    let report = RoofReconstructor::new(config.params.clone())
        .process(&map, &cloud, &georef)
        .map_err(|e| e.to_string())?;

    write_json_file(&config.output.report_json, &report)?;
    if let Some(path) = &config.output.cleaned_map {
        save_class_map(&report.cleaned_map, path)?;
        println!("Saved cleaned class map to {}", path.display());
    }

    let s = &report.summary;
    println!(
        "{} facet groups from {} corners ({} candidates, {} dropped, {} unmatched) in {:.1} ms",
        s.facet_groups,
        s.facet_corners,
        s.corner_candidates,
        s.dropped_corners,
        s.unmatched_elevations,
        report.trace.timings.total_ms
    );
    println!("Saved report to {}", config.output.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: reconstruct_roof <config.json>".to_string()
}
