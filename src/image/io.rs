//! I/O helpers for label rasters and JSON reports.
//!
//! - `load_class_map`: read a single-channel PNG label image into a [`ClassMap`].
//! - `save_class_map`: write a label grid back to an 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ClassMap, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a label image from disk. Multi-channel inputs keep their luma channel.
pub fn load_class_map(path: &Path) -> Result<ClassMap, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    ClassMap::new(width, height, img.into_raw())
        .map_err(|e| format!("Invalid class map {}: {e}", path.display()))
}

/// Save a label grid as an 8-bit grayscale PNG (label values unchanged).
pub fn save_class_map(map: &ClassMap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(map.width() as u32, map.height() as u32);
    for row in 0..map.height() {
        for (col, &label) in map.row(row).iter().enumerate() {
            out.put_pixel(col as u32, row as u32, Luma([label]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
