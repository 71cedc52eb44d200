// Sub-image regions for sprite sheets and tilesets

use glam::Vec2;

/// A rectangular region within a larger image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// Position in the image (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the region (pixels)
    pub width: u32,
    pub height: u32,

    /// UV coordinates (0.0 to 1.0)
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl AtlasRegion {
    /// Create a new region with calculated UV coordinates
    pub fn new(x: u32, y: u32, width: u32, height: u32, atlas_width: u32, atlas_height: u32) -> Self {
        let atlas = Vec2::new(atlas_width.max(1) as f32, atlas_height.max(1) as f32);
        let uv_min = Vec2::new(x as f32, y as f32) / atlas;
        let uv_max = Vec2::new((x + width) as f32, (y + height) as f32) / atlas;

        Self {
            x,
            y,
            width,
            height,
            uv_min,
            uv_max,
        }
    }

    /// The whole image as one region
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height, width, height)
    }

    /// Size of the region as a float vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Cut an image into equal tiles, row-major from the top-left.
///
/// Partial tiles at the right and bottom edges are dropped. Every tile gets a
/// region, so callers bound the grid before slicing untrusted sizes.
pub fn slice_grid(image_width: u32, image_height: u32, tile_width: u32, tile_height: u32) -> Vec<AtlasRegion> {
    if tile_width == 0 || tile_height == 0 {
        return Vec::new();
    }

    let cols = image_width / tile_width;
    let rows = image_height / tile_height;

    let count = u64::from(cols) * u64::from(rows);
    let mut regions = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for row in 0..rows {
        for col in 0..cols {
            regions.push(AtlasRegion::new(
                col * tile_width,
                row * tile_height,
                tile_width,
                tile_height,
                image_width,
                image_height,
            ));
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_region_uv() {
        let region = AtlasRegion::new(0, 0, 64, 64, 256, 256);

        assert_eq!(region.uv_min, Vec2::new(0.0, 0.0));
        assert_eq!(region.uv_max, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn test_full_region() {
        let region = AtlasRegion::full(32, 16);
        assert_eq!(region.uv_min, Vec2::ZERO);
        assert_eq!(region.uv_max, Vec2::ONE);
        assert_eq!(region.size(), Vec2::new(32.0, 16.0));
    }

    #[test]
    fn test_slice_grid_row_major() {
        let regions = slice_grid(128, 64, 32, 32);
        assert_eq!(regions.len(), 8);

        // Second row starts after four columns
        assert_eq!((regions[3].x, regions[3].y), (96, 0));
        assert_eq!((regions[4].x, regions[4].y), (0, 32));
        assert_eq!(regions[4].uv_min, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_slice_grid_drops_partial_tiles() {
        let regions = slice_grid(100, 40, 32, 32);
        assert_eq!(regions.len(), 3);
    }

    #[test]
    fn test_slice_grid_zero_tile_size() {
        assert!(slice_grid(64, 64, 0, 32).is_empty());
    }
}
