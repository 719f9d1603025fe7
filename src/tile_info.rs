//! Human-readable summary of a single map tile.
//!
//! Every field resolves through a `Lookup`, so out-of-table indices and the
//! "none" sentinel are handled in one place and formatting never fails.

use crate::hex::HexCoord;
use crate::map_data::{NameTables, TileRecord, NONE_SENTINEL};

/// Label for values that are neither a table entry nor the sentinel.
pub const UNKNOWN: &str = "Unknown";

/// Result of resolving an attribute code to a display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A recognised value with its name
    Known(&'a str),
    /// The sentinel: the field is intentionally empty
    Absent,
    /// Anything else
    Unrecognized,
}

impl<'a> Lookup<'a> {
    /// Table lookup without a sentinel.
    pub fn in_table(table: &'a [String], index: u8) -> Self {
        match table.get(index as usize) {
            Some(name) => Lookup::Known(name.as_str()),
            None => Lookup::Unrecognized,
        }
    }

    /// Table lookup where `NONE_SENTINEL` means absent. In-range indices win.
    pub fn in_table_or_sentinel(table: &'a [String], index: u8) -> Self {
        match table.get(index as usize) {
            Some(name) => Lookup::Known(name.as_str()),
            None if index == NONE_SENTINEL => Lookup::Absent,
            None => Lookup::Unrecognized,
        }
    }

    /// Display text, using `absent` for the sentinel case.
    pub fn label(self, absent: &'a str) -> &'a str {
        match self {
            Lookup::Known(name) => name,
            Lookup::Absent => absent,
            Lookup::Unrecognized => UNKNOWN,
        }
    }
}

pub fn terrain(names: &NameTables, index: u8) -> Lookup<'_> {
    Lookup::in_table(&names.terrain, index)
}

pub fn resource(names: &NameTables, index: u8) -> Lookup<'_> {
    Lookup::in_table_or_sentinel(&names.resources, index)
}

pub fn improvement(names: &NameTables, index: u8) -> Lookup<'_> {
    Lookup::in_table_or_sentinel(&names.improvements, index)
}

pub fn elevation(code: u8) -> Lookup<'static> {
    match code {
        0 => Lookup::Known("Flat Terrain"),
        1 => Lookup::Known("Hills"),
        2 => Lookup::Known("Mountains"),
        _ => Lookup::Unrecognized,
    }
}

pub fn route(code: u8) -> Lookup<'static> {
    match code {
        0 => Lookup::Known("Road"),
        1 => Lookup::Known("Railroad"),
        NONE_SENTINEL => Lookup::Absent,
        _ => Lookup::Unrecognized,
    }
}

/// Format a tile as one attribute per line.
pub fn format_tile(coord: HexCoord, tile: &TileRecord, names: &NameTables) -> String {
    format!(
        "Plot ({}, {})\n\
         City: {}\n\
         Owner: Player {}\n\
         Terrain: {}\n\
         Elevation: {}\n\
         Resource: {}\n\
         Tile Improvement: {}\n\
         Route: {}\n",
        coord.col,
        coord.row,
        tile.city_name,
        tile.owner,
        terrain(names, tile.terrain).label(UNKNOWN),
        elevation(tile.elevation).label(UNKNOWN),
        resource(names, tile.resource).label("No Resource"),
        improvement(names, tile.improvement).label("No Improvement"),
        route(tile.route).label("No Route"),
    )
}
