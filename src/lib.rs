//! Hex map viewer library
//!
//! Loads hex-grid strategy maps, renders them in political or physical mode,
//! magnifies them with a cached nearest-neighbour raster and maps screen
//! clicks back to tiles.

pub mod config;
pub mod controller;
pub mod export;
pub mod hex;
pub mod map_data;
pub mod provider;
pub mod raster;
pub mod render;
pub mod session;
pub mod synthetic;
pub mod tile_info;
pub mod tilemap;
pub mod viewer;
pub mod zoom;
