//! File I/O helpers for rasters and JSON.
//!
//! - `load_image_with_orientation`: decode an image and read its EXIF orientation.
//! - `save_rgb_png`: write an RGB raster as lossless PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::CalibError;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Decode an image from disk together with its EXIF orientation code
/// (1 when absent).
pub fn load_image_with_orientation(path: &Path) -> Result<(DynamicImage, u32), CalibError> {
    let file = File::open(path)
        .map_err(|e| CalibError::Io(format!("failed to open {}: {e}", path.display())))?;
    let orientation = super::orient::read_exif_orientation(&mut BufReader::new(file));
    let img = image::open(path)
        .map_err(|e| CalibError::InvalidInput(format!("failed to decode {}: {e}", path.display())))?;
    Ok((img, orientation))
}

/// Save an RGB raster as PNG, creating parent directories.
pub fn save_rgb_png(image: &RgbImage, path: &Path) -> Result<(), CalibError> {
    ensure_parent_dir(path)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CalibError::Io(format!("failed to save {}: {e}", path.display())))
}

/// `<dir>/<stem>_<suffix>.png`
pub fn output_path(dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{stem}_{suffix}.png"))
}

/// File stem of `path`, or `"image"` when it has none.
pub fn file_stem_or_default(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image")
        .to_string()
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), CalibError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        CalibError::Io(format!("failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json)
        .map_err(|e| CalibError::Io(format!("failed to write JSON {}: {e}", path.display())))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), CalibError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CalibError::Io(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_follow_stem_convention() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            output_path(dir, "IMG_001", "edge"),
            PathBuf::from("/tmp/out/IMG_001_edge.png")
        );
        assert_eq!(
            file_stem_or_default(Path::new("/a/b/shot.jpg")),
            "shot".to_string()
        );
        assert_eq!(file_stem_or_default(Path::new("/")), "image".to_string());
    }
}
