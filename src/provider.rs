//! Map sources: anything that can turn a path and a mode into a base image plus tile data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::info;

use crate::hex::HexLayout;
use crate::map_data::{MapData, MapDocument, NameTables};
use crate::render::{render_map, MapMode};
use crate::tilemap::Tilemap;

/// Errors from loading a map.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("unable to open file \"{}\": {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid map JSON
    #[error("failed to read map file: {0}")]
    Json(#[from] serde_json::Error),
    /// Tile count does not match the declared grid
    #[error("map declares {width}x{height} tiles but contains {found}")]
    TileCount {
        width: usize,
        height: usize,
        found: usize,
    },
    /// Grid has no rows or no columns
    #[error("map has no tiles")]
    EmptyGrid,
    /// The provider does not understand this file type
    #[error("unsupported map file format: {0}")]
    UnsupportedFormat(String),
    /// Unknown rendering mode
    #[error("unsupported map mode: {0}")]
    UnsupportedMode(String),
}

/// Everything produced by one successful load. Replaced as a unit.
#[derive(Clone, Debug)]
pub struct LoadedMap {
    /// Base bitmap for the requested mode
    pub image: RgbaImage,
    pub data: MapData,
    /// Geometry the image was drawn with
    pub layout: HexLayout,
}

impl LoadedMap {
    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    pub fn cols(&self) -> usize {
        self.data.cols()
    }
}

/// Source of base images and tile attributes.
pub trait MapProvider {
    fn load_map(&self, path: &Path, mode: MapMode) -> Result<LoadedMap, LoadError>;
}

/// Reads `.json` map documents and draws them with a hex layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonMapProvider {
    pub layout: HexLayout,
}

impl JsonMapProvider {
    pub fn new(layout: HexLayout) -> Self {
        Self { layout }
    }

    /// Validate a parsed document and draw it.
    pub fn build(&self, doc: MapDocument, mode: MapMode) -> Result<LoadedMap, LoadError> {
        let data = map_data_from_document(doc)?;
        let image = render_map(&data, &self.layout, mode);
        Ok(LoadedMap {
            image,
            data,
            layout: self.layout,
        })
    }
}

impl MapProvider for JsonMapProvider {
    fn load_map(&self, path: &Path, mode: MapMode) -> Result<LoadedMap, LoadError> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            return Err(LoadError::UnsupportedFormat(path.display().to_string()));
        }

        info!("Importing map file from json: {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: MapDocument = serde_json::from_str(&text)?;
        self.build(doc, mode)
    }
}

/// Check grid dimensions and move the document into lookup form.
pub fn map_data_from_document(doc: MapDocument) -> Result<MapData, LoadError> {
    if doc.width == 0 || doc.height == 0 {
        return Err(LoadError::EmptyGrid);
    }

    let (width, height) = (doc.width, doc.height);
    let tiles = Tilemap::from_vec(width, height, doc.tiles).map_err(|tiles| LoadError::TileCount {
        width,
        height,
        found: tiles.len(),
    })?;

    Ok(MapData {
        tiles,
        names: NameTables {
            terrain: doc.terrain_list,
            resources: doc.resource_list,
            improvements: doc.improvement_list,
        },
        color_overrides: doc
            .color_overrides
            .into_iter()
            .map(|o| (o.player, o.color))
            .collect(),
    })
}
