//! Event handling for the viewer: loads, mode and zoom changes, clicks.
//!
//! Every handler runs to completion before returning. A failed load leaves the
//! previous map, cache and zoom untouched and only updates the status line.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, error, info};

use crate::export::{self, ExportError};
use crate::hex::map_pixel_to_tile;
use crate::provider::{LoadError, MapProvider};
use crate::render::MapMode;
use crate::session::ViewerSession;
use crate::tile_info::format_tile;
use crate::zoom::Zoom;

pub struct InteractionController<P: MapProvider> {
    provider: P,
    session: ViewerSession,
}

impl<P: MapProvider> InteractionController<P> {
    pub fn new(provider: P, mode: MapMode, zoom: Zoom) -> Self {
        Self {
            provider,
            session: ViewerSession::new(mode, zoom),
        }
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    pub fn mode(&self) -> MapMode {
        self.session.mode
    }

    pub fn zoom(&self) -> Zoom {
        self.session.zoom
    }

    pub fn status(&self) -> &str {
        &self.session.status
    }

    /// Text from the most recent click, if any.
    pub fn tile_text(&self) -> Option<&str> {
        self.session.tile_text.as_deref()
    }

    pub fn base_image(&self) -> Option<&RgbaImage> {
        self.session.map.as_ref().map(|m| &m.image)
    }

    pub fn source(&self) -> Option<&Path> {
        self.session.source.as_deref()
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.session.display_size()
    }

    /// Load a map file in the current mode.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        match self.provider.load_map(path, self.session.mode) {
            Ok(map) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.session.status = format!(
                    "File: {} | Width: {} | Height: {} | Map Rows: {} | Map Cols: {}",
                    name,
                    map.image.width(),
                    map.image.height(),
                    map.rows(),
                    map.cols(),
                );
                info!("{}", self.session.status);

                self.session.install(map, PathBuf::from(path));
                let (w, h) = self.display_size();
                debug!("Display size {}x{} at {}", w, h, self.session.zoom);
                Ok(())
            }
            Err(err) => {
                error!("Failed to load {}: {}", path.display(), err);
                self.session.status = err.to_string();
                Err(err)
            }
        }
    }

    /// Load the current file again in the current mode. No-op when nothing is loaded.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let Some(path) = self.session.source.clone() else {
            return Ok(());
        };
        self.load_file(path)
    }

    /// Switch rendering mode by name and reload.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), LoadError> {
        let mode: MapMode = match mode.parse() {
            Ok(mode) => mode,
            Err(name) => {
                let err = LoadError::UnsupportedMode(name);
                error!("{}", err);
                self.session.status = err.to_string();
                return Err(err);
            }
        };

        self.session.mode = mode;
        if self.session.is_loaded() {
            info!("Reload map with new mode: {}", mode);
        }
        self.reload()
    }

    /// Set the zoom level (clamped to 1..=16) and rebuild the cache.
    pub fn set_zoom(&mut self, level: i64) -> Zoom {
        let zoom = Zoom::new(level);
        self.session.zoom = zoom;
        self.session.refresh_cache();
        debug!("Zoom set to {}", zoom);
        zoom
    }

    pub fn zoom_in(&mut self) -> Zoom {
        self.set_zoom(self.session.zoom.zoomed_in().get() as i64)
    }

    pub fn zoom_out(&mut self) -> Zoom {
        self.set_zoom(self.session.zoom.zoomed_out().get() as i64)
    }

    /// Pixels for a display surface of the given size.
    pub fn render_viewport(&self, width: u32, height: u32) -> Cow<'_, RgbaImage> {
        self.session.cache.view(width, height)
    }

    /// Inspect the tile under a display pixel.
    ///
    /// Returns the formatted tile text, also kept as the session's current tile
    /// text. Returns `None` when no map is loaded.
    pub fn handle_click(&mut self, x: i64, y: i64) -> Option<&str> {
        let map = self.session.map.as_ref()?;
        let coord = map_pixel_to_tile(&map.layout, x, y, self.session.zoom, map.rows(), map.cols())?;
        let tile = map.data.tiles.get(coord.col, coord.row)?;

        let text = format_tile(coord, tile, &map.data.names);
        debug!("Clicked ({}, {}) -> plot ({}, {})", x, y, coord.col, coord.row);
        self.session.tile_text = Some(text);
        self.session.tile_text.as_deref()
    }

    /// Save the base image (not the magnified cache) as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), ExportError> {
        let image = self.base_image().ok_or(ExportError::NothingLoaded)?;
        export::save_png(image, path)
    }

    /// Export the loaded map document as JSON.
    pub fn export_json(&self, path: &Path) -> Result<(), ExportError> {
        let map = self.session.map.as_ref().ok_or(ExportError::NothingLoaded)?;
        export::write_map_json(&map.data.to_document(), path)
    }
}
