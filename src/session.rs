//! Viewer session state.
//!
//! The session owns everything that changes while the viewer runs: the loaded
//! map (base image, tiles, names, geometry), the zoom factor, the raster cache
//! derived from them, and the text shown to the user. Components borrow from it
//! instead of keeping their own copies.

use std::path::PathBuf;

use crate::provider::LoadedMap;
use crate::raster::ZoomRasterCache;
use crate::render::MapMode;
use crate::zoom::Zoom;

#[derive(Debug, Default)]
pub struct ViewerSession {
    /// Last successfully loaded map; `None` until the first load.
    pub map: Option<LoadedMap>,
    pub zoom: Zoom,
    pub cache: ZoomRasterCache,
    pub mode: MapMode,
    /// File the current map was loaded from
    pub source: Option<PathBuf>,
    /// One-line status for the surrounding application
    pub status: String,
    /// Text from the last tile inspection
    pub tile_text: Option<String>,
}

impl ViewerSession {
    pub fn new(mode: MapMode, zoom: Zoom) -> Self {
        Self {
            mode,
            zoom,
            ..Self::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.map.is_some()
    }

    /// Install a freshly loaded map and rebuild the cache for it.
    pub fn install(&mut self, map: LoadedMap, source: PathBuf) {
        self.cache.rebuild(&map.image, self.zoom);
        self.map = Some(map);
        self.source = Some(source);
    }

    /// Rebuild the cache from the current base image, if any.
    pub fn refresh_cache(&mut self) {
        if let Some(map) = &self.map {
            self.cache.rebuild(&map.image, self.zoom);
        }
    }

    /// Size of the magnified image on screen.
    pub fn display_size(&self) -> (u32, u32) {
        match &self.map {
            Some(map) => (
                map.image.width() * self.zoom.get(),
                map.image.height() * self.zoom.get(),
            ),
            None => (0, 0),
        }
    }
}
