/// A 2D grid of map cells stored row-major, addressed by (column, row).
///
/// Unlike the pixel grid of the rendered image, the tilemap has one entry per
/// logical map tile. Rows do not wrap; out-of-range lookups return `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T> Tilemap<T> {
    /// Build a tilemap from row-major cells.
    /// Returns the cells back if their count does not match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Vec<T>> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(data);
        }
        Ok(Self { width, height, data })
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        self.index(col, row).map(|idx| &self.data[idx])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
