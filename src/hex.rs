//! Hex grid geometry and pixel-to-tile mapping.
//!
//! Maps are stored as an offset rectangular grid of pointy-top hexes where odd
//! rows are shifted right by half a tile width. The geometry is kept behind the
//! `HexGeometry` trait so the click mapper does not depend on how the base image
//! was drawn.

use crate::zoom::Zoom;

const SQRT_3: f32 = 1.732_050_8;

/// Column/row index into the logical tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexCoord {
    pub col: usize,
    pub row: usize,
}

impl HexCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Converts base-image pixels into tile coordinates.
pub trait HexGeometry {
    /// Tile under the pixel at (`px`, `py`) of the unzoomed base image.
    ///
    /// Must be total and deterministic: pixels outside the drawn area resolve to
    /// a tile on the grid's edge (clamped per axis, not necessarily the closest
    /// one). `rows` and `cols` are both non-zero.
    fn pixel_to_tile(&self, px: i64, py: i64, rows: usize, cols: usize) -> HexCoord;
}

/// Pointy-top offset layout parameterised by the hex radius (centre to corner) in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    pub radius: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self { radius: 6.0 }
    }
}

impl HexLayout {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(1.0),
        }
    }

    /// Horizontal distance between neighbouring centres in a row.
    pub fn tile_width(&self) -> f32 {
        SQRT_3 * self.radius
    }

    /// Vertical distance between neighbouring rows.
    pub fn row_spacing(&self) -> f32 {
        1.5 * self.radius
    }

    fn row_offset(row: usize) -> f32 {
        if row % 2 == 1 {
            0.5
        } else {
            0.0
        }
    }

    /// Size in pixels of an image holding the whole grid.
    pub fn image_size(&self, rows: usize, cols: usize) -> (u32, u32) {
        if rows == 0 || cols == 0 {
            return (0, 0);
        }
        let width = self.tile_width() * (cols as f32 + 0.5);
        let height = 2.0 * self.radius + self.row_spacing() * (rows - 1) as f32;
        (width.ceil() as u32, height.ceil() as u32)
    }

    /// Pixel-space centre of a tile.
    pub fn center(&self, coord: HexCoord) -> (f32, f32) {
        let x = self.tile_width() * (coord.col as f32 + 0.5 + Self::row_offset(coord.row));
        let y = self.radius + self.row_spacing() * coord.row as f32;
        (x, y)
    }

    /// Whether the point lies inside the hexagon of `coord`.
    pub fn contains(&self, coord: HexCoord, x: f32, y: f32) -> bool {
        let (cx, cy) = self.center(coord);
        let dx = (x - cx).abs();
        let dy = (y - cy).abs();
        dx <= self.tile_width() / 2.0 && dy + dx / SQRT_3 <= self.radius
    }

    /// Tile whose centre is closest to the point, restricted to the grid.
    ///
    /// Inside the grid the nearest centre is exactly the containing hex. Outside,
    /// the search window is clamped per axis, so the result is an edge tile but
    /// not always the edge tile closest to the point.
    pub fn nearest_tile(&self, x: f32, y: f32, rows: usize, cols: usize) -> HexCoord {
        let last_row = rows.saturating_sub(1) as i64;
        let last_col = cols.saturating_sub(1) as i64;

        let row_guess = ((y - self.radius) / self.row_spacing()).round() as i64;
        let mut best: Option<(HexCoord, f32)> = None;

        for row in row_guess.saturating_sub(1)..=row_guess.saturating_add(1) {
            let row = row.clamp(0, last_row) as usize;
            let col_guess = (x / self.tile_width() - 0.5 - Self::row_offset(row)).round() as i64;

            for col in col_guess.saturating_sub(1)..=col_guess.saturating_add(1) {
                let coord = HexCoord::new(col.clamp(0, last_col) as usize, row);
                let (cx, cy) = self.center(coord);
                let dist = (x - cx).powi(2) + (y - cy).powi(2);
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some((coord, dist));
                }
            }
        }

        best.map(|(coord, _)| coord).unwrap_or(HexCoord::new(0, 0))
    }
}

impl HexGeometry for HexLayout {
    fn pixel_to_tile(&self, px: i64, py: i64, rows: usize, cols: usize) -> HexCoord {
        // Sample the pixel centre
        self.nearest_tile(px as f32 + 0.5, py as f32 + 0.5, rows, cols)
    }
}

/// Map a display pixel to the tile under it.
///
/// The display is the base image magnified by `zoom`, so the pixel is first
/// divided back into base-image space (fraction discarded). Returns `None` only
/// when the grid has no tiles at all.
pub fn map_pixel_to_tile<G: HexGeometry + ?Sized>(
    geometry: &G,
    pixel_x: i64,
    pixel_y: i64,
    zoom: Zoom,
    rows: usize,
    cols: usize,
) -> Option<HexCoord> {
    if rows == 0 || cols == 0 {
        return None;
    }

    let z = zoom.get() as i64;
    let coord = geometry.pixel_to_tile(pixel_x / z, pixel_y / z, rows, cols);

    Some(HexCoord::new(
        coord.col.min(cols - 1),
        coord.row.min(rows - 1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Square cells of a fixed size, for checking the zoom inversion alone.
    struct SquareGrid(i64);

    impl HexGeometry for SquareGrid {
        fn pixel_to_tile(&self, px: i64, py: i64, rows: usize, cols: usize) -> HexCoord {
            HexCoord::new(
                (px / self.0).clamp(0, cols as i64 - 1) as usize,
                (py / self.0).clamp(0, rows as i64 - 1) as usize,
            )
        }
    }

    #[test]
    fn test_centers_round_trip() {
        let layout = HexLayout::new(8.0);
        for row in 0..6 {
            for col in 0..9 {
                let coord = HexCoord::new(col, row);
                let (cx, cy) = layout.center(coord);
                assert!(layout.contains(coord, cx, cy));
                assert_eq!(layout.nearest_tile(cx, cy, 6, 9), coord);
            }
        }
    }

    #[test]
    fn test_odd_rows_are_offset() {
        let layout = HexLayout::new(10.0);
        let (even_x, _) = layout.center(HexCoord::new(0, 0));
        let (odd_x, _) = layout.center(HexCoord::new(0, 1));
        assert!((odd_x - even_x - layout.tile_width() / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_image_size_covers_all_hexes() {
        let layout = HexLayout::new(5.0);
        let (w, h) = layout.image_size(4, 7);
        for row in 0..4 {
            for col in 0..7 {
                let (cx, cy) = layout.center(HexCoord::new(col, row));
                assert!(cx + layout.tile_width() / 2.0 <= w as f32 + 1e-3);
                assert!(cy + layout.radius <= h as f32 + 1e-3);
            }
        }
        assert_eq!(layout.image_size(0, 7), (0, 0));
    }

    #[test]
    fn test_mapper_always_in_range() {
        let layout = HexLayout::new(6.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..2000 {
            let rows = rng.gen_range(1..30);
            let cols = rng.gen_range(1..30);
            let zoom = Zoom::new(rng.gen_range(1..=16));
            let x = rng.gen_range(-5000i64..5000);
            let y = rng.gen_range(-5000i64..5000);

            let coord = map_pixel_to_tile(&layout, x, y, zoom, rows, cols).unwrap();
            assert!(coord.col < cols, "col {} out of {}", coord.col, cols);
            assert!(coord.row < rows, "row {} out of {}", coord.row, rows);
        }
    }

    #[test]
    fn test_mapper_extreme_pixels_clamp_to_corners() {
        let layout = HexLayout::new(6.0);
        let zoom = Zoom::new(1);
        assert_eq!(
            map_pixel_to_tile(&layout, i64::MIN, i64::MIN, zoom, 5, 8),
            Some(HexCoord::new(0, 0))
        );
        assert_eq!(
            map_pixel_to_tile(&layout, i64::MAX, i64::MAX, zoom, 5, 8),
            Some(HexCoord::new(7, 4))
        );
    }

    #[test]
    fn test_mapper_inverts_zoom() {
        let grid = SquareGrid(10);
        // Display pixel (75, 39) at 4x is base pixel (18, 9)
        assert_eq!(
            map_pixel_to_tile(&grid, 75, 39, Zoom::new(4), 10, 10),
            Some(HexCoord::new(1, 0))
        );
        assert_eq!(
            map_pixel_to_tile(&grid, 75, 39, Zoom::new(1), 10, 10),
            Some(HexCoord::new(7, 3))
        );
    }

    #[test]
    fn test_mapper_matches_centers_at_zoom() {
        let layout = HexLayout::new(7.0);
        let zoom = Zoom::new(3);
        let coord = HexCoord::new(4, 3);
        let (cx, cy) = layout.center(coord);
        let display_x = (cx as i64) * 3 + 1;
        let display_y = (cy as i64) * 3 + 2;
        assert_eq!(map_pixel_to_tile(&layout, display_x, display_y, zoom, 6, 6), Some(coord));
    }

    #[test]
    fn test_mapper_empty_grid() {
        let layout = HexLayout::default();
        assert_eq!(map_pixel_to_tile(&layout, 3, 3, Zoom::default(), 0, 5), None);
        assert_eq!(map_pixel_to_tile(&layout, 3, 3, Zoom::default(), 5, 0), None);
    }

    #[test]
    fn test_points_outside_image_resolve_to_edge_tiles() {
        let (rows, cols) = (7, 9);
        for radius in [1.0, 3.0, 6.0, 7.5] {
            let layout = HexLayout::new(radius);
            let (w, h) = layout.image_size(rows, cols);
            let (w, h) = (w as i64, h as i64);

            for py in -40..h + 40 {
                for px in -40..w + 40 {
                    if (0..w).contains(&px) && (0..h).contains(&py) {
                        continue;
                    }
                    let coord = layout.pixel_to_tile(px, py, rows, cols);
                    assert!(coord.col < cols && coord.row < rows);
                    let on_edge = coord.row == 0
                        || coord.row == rows - 1
                        || coord.col == 0
                        || coord.col == cols - 1;
                    assert!(on_edge, "r={} ({}, {}) -> {:?}", radius, px, py, coord);
                }
            }
        }
    }
}
