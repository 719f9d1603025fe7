//! Integer magnification applied to the base map image.

use std::fmt;

/// Smallest zoom factor (1 screen pixel per image pixel).
pub const MIN_ZOOM: u32 = 1;

/// Largest zoom factor. Caps the cost of a cache rebuild.
pub const MAX_ZOOM: u32 = 16;

/// Zoom factor, always within `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zoom(u32);

impl Zoom {
    /// Clamp any requested level into the valid range.
    pub fn new(level: i64) -> Self {
        Zoom(level.clamp(MIN_ZOOM as i64, MAX_ZOOM as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Double the zoom (clamped).
    pub fn zoomed_in(self) -> Self {
        Zoom::new(self.0 as i64 * 2)
    }

    /// Halve the zoom (clamped).
    pub fn zoomed_out(self) -> Self {
        Zoom::new(self.0 as i64 / 2)
    }

    /// Zoom expressed as a percentage label value (1 -> 100).
    pub fn percent(self) -> u32 {
        self.0 * 100
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom(MIN_ZOOM)
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps_to_range() {
        for level in -40i64..=40 {
            assert_eq!(Zoom::new(level).get() as i64, level.clamp(1, 16));
        }
        assert_eq!(Zoom::new(i64::MIN).get(), MIN_ZOOM);
        assert_eq!(Zoom::new(i64::MAX).get(), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_steps() {
        let zoom = Zoom::default();
        assert_eq!(zoom.zoomed_out().get(), 1);
        assert_eq!(zoom.zoomed_in().zoomed_in().get(), 4);
        assert_eq!(Zoom::new(16).zoomed_in().get(), 16);
        assert_eq!(Zoom::new(3).zoomed_out().get(), 1);
    }

    #[test]
    fn test_zoom_label() {
        assert_eq!(Zoom::new(4).to_string(), "400%");
    }
}
