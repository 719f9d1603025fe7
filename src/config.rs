//! Viewer configuration.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from reading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup settings. Missing fields in a config file take the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Zoom applied before the first map is shown (clamped to 1-16).
    pub initial_zoom: i64,

    /// Map mode name ("political" or "physical").
    pub initial_mode: String,

    /// Hex radius in base-image pixels.
    pub hex_radius: f32,

    pub window_title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 1,
            initial_mode: "political".to_string(),
            hex_radius: 6.0,
            window_title: "Hex Map Viewer".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
