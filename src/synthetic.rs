//! Random but well-formed map documents for demos and tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::map_data::{MapDocument, TileRecord, NONE_SENTINEL, NO_OWNER};

const TERRAIN: [&str; 7] = [
    "TERRAIN_GRASS",
    "TERRAIN_PLAINS",
    "TERRAIN_DESERT",
    "TERRAIN_TUNDRA",
    "TERRAIN_SNOW",
    "TERRAIN_COAST",
    "TERRAIN_OCEAN",
];
const GRASS: u8 = 0;
const PLAINS: u8 = 1;
const DESERT: u8 = 2;
const TUNDRA: u8 = 3;
const SNOW: u8 = 4;
const COAST: u8 = 5;
const OCEAN: u8 = 6;

const RESOURCES: [&str; 4] = ["RESOURCE_IRON", "RESOURCE_HORSE", "RESOURCE_WHEAT", "RESOURCE_GOLD"];

const IMPROVEMENTS: [&str; 3] = ["IMPROVEMENT_FARM", "IMPROVEMENT_MINE", "IMPROVEMENT_PASTURE"];

const CITY_NAMES: [&str; 8] = [
    "Ashford", "Brightwater", "Coldharbour", "Dunmere", "Eastmarch", "Fairhaven", "Greystone",
    "Highcliff",
];

/// Radius (in tiles) of territory claimed around each capital.
const TERRITORY_RADIUS: i64 = 3;

fn is_water(terrain: u8) -> bool {
    terrain == COAST || terrain == OCEAN
}

/// Generate a `cols` x `rows` map from a seed.
pub fn generate_synthetic_map(cols: usize, rows: usize, seed: u64) -> MapDocument {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tiles = Vec::with_capacity(cols * rows);

    for row in 0..rows {
        // 0 at the equator row, 1 at the poles
        let latitude = if rows > 1 {
            (row as f32 / (rows - 1) as f32 - 0.5).abs() * 2.0
        } else {
            0.0
        };

        for col in 0..cols {
            let shore = col_edge_distance(col, cols);
            let terrain = if shore == 0 {
                OCEAN
            } else if shore == 1 || rng.gen_bool(0.08) {
                COAST
            } else if latitude > 0.85 {
                SNOW
            } else if latitude > 0.65 {
                TUNDRA
            } else if latitude < 0.2 && rng.gen_bool(0.4) {
                DESERT
            } else if rng.gen_bool(0.5) {
                GRASS
            } else {
                PLAINS
            };

            let elevation = if is_water(terrain) {
                0
            } else {
                match rng.gen_range(0..10) {
                    0 => 2,
                    1 | 2 => 1,
                    _ => 0,
                }
            };

            let resource = if !is_water(terrain) && rng.gen_bool(0.15) {
                rng.gen_range(0..RESOURCES.len()) as u8
            } else {
                NONE_SENTINEL
            };

            tiles.push(TileRecord {
                owner: NO_OWNER,
                city_name: String::new(),
                terrain,
                elevation,
                resource,
                improvement: NONE_SENTINEL,
                route: NONE_SENTINEL,
            });
        }
    }

    place_civilizations(&mut tiles, cols, rows, &mut rng);

    MapDocument {
        width: cols,
        height: rows,
        terrain_list: TERRAIN.iter().map(|s| s.to_string()).collect(),
        resource_list: RESOURCES.iter().map(|s| s.to_string()).collect(),
        improvement_list: IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        tiles,
        color_overrides: Vec::new(),
    }
}

fn col_edge_distance(col: usize, cols: usize) -> usize {
    col.min(cols.saturating_sub(1 + col))
}

/// Drop a few capitals on land and claim the land around them.
fn place_civilizations(tiles: &mut [TileRecord], cols: usize, rows: usize, rng: &mut ChaCha8Rng) {
    let land: Vec<usize> = tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| !is_water(t.terrain))
        .map(|(i, _)| i)
        .collect();
    if land.is_empty() {
        return;
    }

    let players = (land.len() / 40).clamp(1, CITY_NAMES.len());
    for player in 0..players {
        let capital = land[rng.gen_range(0..land.len())];
        if !tiles[capital].city_name.is_empty() {
            continue;
        }
        tiles[capital].city_name = CITY_NAMES[player].to_string();
        let (ccol, crow) = ((capital % cols) as i64, (capital / cols) as i64);

        for row in (crow - TERRITORY_RADIUS).max(0)..=(crow + TERRITORY_RADIUS).min(rows as i64 - 1) {
            for col in (ccol - TERRITORY_RADIUS).max(0)..=(ccol + TERRITORY_RADIUS).min(cols as i64 - 1) {
                let tile = &mut tiles[row as usize * cols + col as usize];
                if is_water(tile.terrain) || tile.owner != NO_OWNER {
                    continue;
                }
                tile.owner = player as u8;

                let dist = (row - crow).abs().max((col - ccol).abs());
                if dist <= 1 {
                    tile.route = if rng.gen_bool(0.2) { 1 } else { 0 };
                }
                if rng.gen_bool(0.3) {
                    tile.improvement = rng.gen_range(0..IMPROVEMENTS.len()) as u8;
                }
            }
        }
    }
}
