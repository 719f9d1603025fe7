//! Saving the loaded map: base image as PNG, map document as JSON.

use std::fs;
use std::io;
use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::map_data::MapDocument;

/// Errors from exporting.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("no map loaded")]
    NothingLoaded,
    #[error("unsupported export target \"{0}\"")]
    UnsupportedFormat(String),
    #[error("could not encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not serialize map: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write file: {0}")]
    Io(#[from] io::Error),
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Write the base image to a `.png` file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    if !has_extension(path, "png") {
        return Err(ExportError::UnsupportedFormat(path.display().to_string()));
    }
    image.save(path)?;
    info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Write the map document as pretty-printed JSON to a `.json` file.
pub fn write_map_json(doc: &MapDocument, path: &Path) -> Result<(), ExportError> {
    if !has_extension(path, "json") {
        return Err(ExportError::UnsupportedFormat(path.display().to_string()));
    }
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    info!("Exporting map to {}", path.display());
    Ok(())
}
