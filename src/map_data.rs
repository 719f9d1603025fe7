//! Map document model: per-tile attributes and the name tables they index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// Reserved index meaning "intentionally absent" for resource, improvement and route.
pub const NONE_SENTINEL: u8 = 255;

/// Owner id used by the renderers for unclaimed tiles.
pub const NO_OWNER: u8 = 255;

fn none_sentinel() -> u8 {
    NONE_SENTINEL
}

/// Attributes of one map cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Owning player id
    #[serde(default = "none_sentinel")]
    pub owner: u8,
    #[serde(default)]
    pub city_name: String,
    /// Index into the terrain name table
    #[serde(default)]
    pub terrain: u8,
    /// 0 flat, 1 hills, 2 mountains
    #[serde(default)]
    pub elevation: u8,
    #[serde(default = "none_sentinel")]
    pub resource: u8,
    #[serde(default = "none_sentinel")]
    pub improvement: u8,
    /// 0 road, 1 railroad, 255 none
    #[serde(default = "none_sentinel")]
    pub route: u8,
}

impl Default for TileRecord {
    fn default() -> Self {
        Self {
            owner: NO_OWNER,
            city_name: String::new(),
            terrain: 0,
            elevation: 0,
            resource: NONE_SENTINEL,
            improvement: NONE_SENTINEL,
            route: NONE_SENTINEL,
        }
    }
}

/// Name tables indexed by `TileRecord` fields. Sizes vary per map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTables {
    pub terrain: Vec<String>,
    pub resources: Vec<String>,
    pub improvements: Vec<String>,
}

/// Colour assigned to a player, replacing the generated palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOverride {
    pub player: u8,
    pub color: [u8; 3],
}

/// On-disk JSON representation of a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Number of tile columns
    pub width: usize,
    /// Number of tile rows
    pub height: usize,
    #[serde(default)]
    pub terrain_list: Vec<String>,
    #[serde(default)]
    pub resource_list: Vec<String>,
    #[serde(default)]
    pub improvement_list: Vec<String>,
    /// Row-major tiles, `width * height` entries
    pub tiles: Vec<TileRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color_overrides: Vec<ColorOverride>,
}

/// Validated map: tile grid plus lookup tables.
#[derive(Clone, Debug, PartialEq)]
pub struct MapData {
    pub tiles: Tilemap<TileRecord>,
    pub names: NameTables,
    pub color_overrides: HashMap<u8, [u8; 3]>,
}

impl MapData {
    pub fn rows(&self) -> usize {
        self.tiles.height
    }

    pub fn cols(&self) -> usize {
        self.tiles.width
    }

    /// Convert back into the serialisable document form.
    pub fn to_document(&self) -> MapDocument {
        let mut color_overrides: Vec<ColorOverride> = self
            .color_overrides
            .iter()
            .map(|(&player, &color)| ColorOverride { player, color })
            .collect();
        color_overrides.sort_by_key(|o| o.player);

        MapDocument {
            width: self.cols(),
            height: self.rows(),
            terrain_list: self.names.terrain.clone(),
            resource_list: self.names.resources.clone(),
            improvement_list: self.names.improvements.clone(),
            tiles: self.tiles.as_slice().to_vec(),
            color_overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_defaults_use_sentinels() {
        let tile: TileRecord = serde_json::from_str(r#"{"terrain": 2}"#).unwrap();
        assert_eq!(tile.terrain, 2);
        assert_eq!(tile.owner, NO_OWNER);
        assert_eq!(tile.resource, NONE_SENTINEL);
        assert_eq!(tile.improvement, NONE_SENTINEL);
        assert_eq!(tile.route, NONE_SENTINEL);
        assert!(tile.city_name.is_empty());
        assert_eq!(tile, TileRecord { terrain: 2, ..TileRecord::default() });
    }

    #[test]
    fn test_to_document_keeps_layout() {
        let tiles = (0..6)
            .map(|i| TileRecord { terrain: i, ..TileRecord::default() })
            .collect();
        let data = MapData {
            tiles: Tilemap::from_vec(3, 2, tiles).unwrap(),
            names: NameTables {
                terrain: vec!["TERRAIN_GRASS".into()],
                ..NameTables::default()
            },
            color_overrides: HashMap::from([(4, [1, 2, 3]), (1, [9, 9, 9])]),
        };

        let doc = data.to_document();
        assert_eq!((doc.width, doc.height), (3, 2));
        assert_eq!(doc.tiles[4].terrain, 4);
        assert_eq!(doc.terrain_list, vec!["TERRAIN_GRASS".to_string()]);
        assert_eq!(doc.color_overrides[0].player, 1);
        assert_eq!(doc.color_overrides[1].color, [1, 2, 3]);
    }
}
