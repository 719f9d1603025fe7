//! Base bitmap rendering for each map mode.
//!
//! Every pixel is assigned to the hex whose centre is nearest; pixels outside
//! all hexes stay transparent so the grid edge is visible against the window.

use std::fmt;
use std::str::FromStr;

use image::{Rgba, RgbaImage};

use crate::hex::{HexCoord, HexLayout};
use crate::map_data::{MapData, TileRecord, NO_OWNER};
use crate::raster::TRANSPARENT;

/// Semantic colouring of the base bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapMode {
    /// Tiles coloured by owning player
    #[default]
    Political,
    /// Tiles coloured by terrain and elevation
    Physical,
}

impl MapMode {
    pub fn name(&self) -> &'static str {
        match self {
            MapMode::Political => "political",
            MapMode::Physical => "physical",
        }
    }
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "political" => Ok(MapMode::Political),
            "physical" => Ok(MapMode::Physical),
            _ => Err(s.to_string()),
        }
    }
}

/// Draw the whole map in the given mode.
pub fn render_map(data: &MapData, layout: &HexLayout, mode: MapMode) -> RgbaImage {
    let rows = data.rows();
    let cols = data.cols();
    let (width, height) = layout.image_size(rows, cols);

    RgbaImage::from_fn(width, height, |px, py| {
        let x = px as f32 + 0.5;
        let y = py as f32 + 0.5;
        let coord = layout.nearest_tile(x, y, rows, cols);
        if !layout.contains(coord, x, y) {
            return TRANSPARENT;
        }
        let Some(tile) = data.tiles.get(coord.col, coord.row) else {
            return TRANSPARENT;
        };

        let color = match mode {
            MapMode::Political => political_color(data, layout, coord, tile, x, y),
            MapMode::Physical => physical_color(data, tile),
        };
        Rgba([color[0], color[1], color[2], 255])
    })
}

fn political_color(
    data: &MapData,
    layout: &HexLayout,
    coord: HexCoord,
    tile: &TileRecord,
    x: f32,
    y: f32,
) -> [u8; 3] {
    if !tile.city_name.is_empty() {
        let (cx, cy) = layout.center(coord);
        let city_radius = layout.radius * 0.4;
        if (x - cx).powi(2) + (y - cy).powi(2) <= city_radius * city_radius {
            return [245, 240, 225];
        }
    }

    if tile.owner == NO_OWNER {
        // Unclaimed land is a muted version of the terrain
        let terrain = physical_color(data, tile);
        let grey = (terrain[0] as u32 + terrain[1] as u32 + terrain[2] as u32) / 3;
        return lerp_color(terrain, [grey as u8; 3], 0.7);
    }

    player_color(data, tile.owner)
}

/// Colour for a player: override if present, otherwise a golden-angle hue.
pub fn player_color(data: &MapData, player: u8) -> [u8; 3] {
    if let Some(&color) = data.color_overrides.get(&player) {
        return color;
    }
    let hue = (player as f32 * 137.508) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.65, 0.85);
    [r, g, b]
}

fn physical_color(data: &MapData, tile: &TileRecord) -> [u8; 3] {
    let name = data
        .names
        .terrain
        .get(tile.terrain as usize)
        .map(|n| n.to_ascii_lowercase())
        .unwrap_or_default();
    let base = terrain_color(&name);

    match tile.elevation {
        1 => lerp_color(base, [90, 70, 50], 0.35),
        2 => lerp_color(base, [120, 110, 100], 0.75),
        _ => base,
    }
}

/// Terrain colour from a lowercase terrain name.
fn terrain_color(name: &str) -> [u8; 3] {
    if name.contains("ocean") {
        [30, 60, 120]
    } else if name.contains("coast") {
        [60, 100, 150]
    } else if name.contains("lake") {
        [70, 120, 170]
    } else if name.contains("grass") {
        [80, 160, 60]
    } else if name.contains("plains") {
        [160, 170, 80]
    } else if name.contains("desert") {
        [210, 190, 140]
    } else if name.contains("tundra") {
        [140, 130, 100]
    } else if name.contains("snow") {
        [240, 240, 245]
    } else if name.contains("mountain") {
        [120, 110, 100]
    } else {
        [128, 128, 128]
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
