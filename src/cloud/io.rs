//! LAS/LAZ loading for the demo binary.
use crate::types::CloudPoint;
use las::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read every point of a `.las` or `.laz` file.
pub fn load_point_cloud(path: &Path) -> Result<Vec<CloudPoint>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let mut reader = Reader::new(BufReader::new(file))
        .map_err(|e| format!("Failed to read LAS header {}: {e}", path.display()))?;
    let expected = reader.header().number_of_points() as usize;
    let mut points = Vec::with_capacity(expected);
    for point in reader.points() {
        let point =
            point.map_err(|e| format!("Failed to read point from {}: {e}", path.display()))?;
        points.push(CloudPoint::new(
            point.x,
            point.y,
            point.z,
            u8::from(point.classification),
        ));
    }
    Ok(points)
}
