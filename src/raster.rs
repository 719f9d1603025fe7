//! Zoom-scaled raster cache.
//!
//! Holds the base map image magnified by the current zoom factor so the display
//! surface can be served without re-scaling on every frame. The cache is a pure
//! function of (base image, zoom) and is rebuilt in full whenever either changes.

use std::borrow::Cow;

use image::{imageops, Rgba, RgbaImage};
use log::debug;

use crate::zoom::Zoom;

/// Fully transparent pixel used for padding and out-of-bounds samples.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Magnified copy of the base image.
#[derive(Debug, Default)]
pub struct ZoomRasterCache {
    cache: Option<RgbaImage>,
}

impl ZoomRasterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with `base` magnified by `zoom` using pixel replication.
    ///
    /// Cost is O(W * H * zoom^2); there is no incremental path.
    pub fn rebuild(&mut self, base: &RgbaImage, zoom: Zoom) {
        let z = zoom.get();
        let width = base.width() * z;
        let height = base.height() * z;

        let cache = RgbaImage::from_fn(width, height, |x, y| source_pixel(base, x / z, y / z));

        debug!(
            "Rebuilt raster cache: {}x{} -> {}x{} at {}x",
            base.width(),
            base.height(),
            width,
            height,
            z
        );
        self.cache = Some(cache);
    }

    /// Cache dimensions, `(0, 0)` before the first rebuild.
    pub fn dimensions(&self) -> (u32, u32) {
        self.cache
            .as_ref()
            .map(|c| c.dimensions())
            .unwrap_or((0, 0))
    }

    pub fn cache(&self) -> Option<&RgbaImage> {
        self.cache.as_ref()
    }

    /// Serve a buffer for a display surface of the requested size.
    ///
    /// Requests that fit inside the cache get the cache itself, uncropped.
    /// Larger requests get a fresh buffer with the cache in the top-left corner
    /// and transparent padding; the cache is not touched.
    pub fn view(&self, width: u32, height: u32) -> Cow<'_, RgbaImage> {
        let cache = match &self.cache {
            Some(cache) if cache.width() > 0 && cache.height() > 0 => cache,
            _ => return Cow::Owned(RgbaImage::new(width, height)),
        };

        if width <= cache.width() && height <= cache.height() {
            return Cow::Borrowed(cache);
        }

        let mut grown = RgbaImage::new(width, height);
        imageops::replace(&mut grown, cache, 0, 0);
        Cow::Owned(grown)
    }
}

fn source_pixel(base: &RgbaImage, x: u32, y: u32) -> Rgba<u8> {
    base.get_pixel_checked(x, y).copied().unwrap_or(TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_image(width: u32, height: u32, rng: &mut ChaCha8Rng) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, _| Rgba([rng.gen(), rng.gen(), rng.gen(), 255]))
    }

    fn is_transparent(img: &RgbaImage) -> bool {
        img.pixels().all(|p| *p == TRANSPARENT)
    }

    #[test]
    fn test_rebuild_magnifies_by_replication() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let w = rng.gen_range(1..12);
            let h = rng.gen_range(1..12);
            let z = rng.gen_range(1..=16);
            let base = random_image(w, h, &mut rng);

            let mut raster = ZoomRasterCache::new();
            raster.rebuild(&base, Zoom::new(z));
            let cache = raster.cache().unwrap();

            let z = z as u32;
            assert_eq!(cache.dimensions(), (w * z, h * z));
            for (x, y, pixel) in cache.enumerate_pixels() {
                assert_eq!(pixel, base.get_pixel(x / z, y / z));
            }
        }
    }

    #[test]
    fn test_zoom_two_scenario() {
        let base = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 7, 255]));
        let mut raster = ZoomRasterCache::new();
        raster.rebuild(&base, Zoom::new(1));
        assert_eq!(raster.dimensions(), (4, 4));

        raster.rebuild(&base, Zoom::new(2));
        assert_eq!(raster.dimensions(), (8, 8));
        assert_eq!(raster.cache().unwrap().get_pixel(3, 3), base.get_pixel(1, 1));
    }

    #[test]
    fn test_view_without_cache_is_blank() {
        let raster = ZoomRasterCache::new();
        let view = raster.view(100, 50);
        assert_eq!(view.dimensions(), (100, 50));
        assert!(is_transparent(&view));
    }

    #[test]
    fn test_view_of_empty_image_is_blank() {
        let mut raster = ZoomRasterCache::new();
        raster.rebuild(&RgbaImage::new(0, 0), Zoom::new(8));
        assert_eq!(raster.dimensions(), (0, 0));

        let view = raster.view(30, 20);
        assert_eq!(view.dimensions(), (30, 20));
        assert!(is_transparent(&view));
    }

    #[test]
    fn test_view_within_cache_returns_cache() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let base = random_image(5, 3, &mut rng);
        let mut raster = ZoomRasterCache::new();
        raster.rebuild(&base, Zoom::new(3));

        let view = raster.view(10, 9);
        assert!(matches!(view, Cow::Borrowed(_)));
        let cache = raster.cache().unwrap();
        for y in 0..9 {
            for x in 0..10 {
                assert_eq!(view.get_pixel(x, y), cache.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_view_larger_than_cache_pads_transparent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let base = random_image(4, 2, &mut rng);
        let mut raster = ZoomRasterCache::new();
        raster.rebuild(&base, Zoom::new(2));
        let (cw, ch) = raster.dimensions();

        for (w, h) in [(cw + 5, ch), (cw, ch + 3), (cw + 1, ch + 1), (cw + 4, 2)] {
            let view = raster.view(w, h);
            assert_eq!(view.dimensions(), (w, h));
            for (x, y, pixel) in view.enumerate_pixels() {
                if x < cw && y < ch {
                    assert_eq!(pixel, raster.cache().unwrap().get_pixel(x, y));
                } else {
                    assert_eq!(*pixel, TRANSPARENT);
                }
            }
        }

        // Growing a view leaves the stored cache alone
        assert_eq!(raster.dimensions(), (cw, ch));
    }
}
