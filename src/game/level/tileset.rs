// TSX tileset descriptors and the GID -> tile image lookup

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::tiled::MAX_GID;
use super::LevelError;
use crate::engine::assets::{slice_grid, AssetRegistry, AtlasRegion, ImageHandle};

/// Upper bound on tiles taken from one sheet
pub const MAX_TILES_PER_SHEET: u32 = 1 << 16;

/// `<tileset tilewidth=".." tileheight=".."><image source=".." width=".." height=".."/></tileset>`
///
/// The declared image size is informational; tiles are cut from the decoded
/// image.
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetDocument {
    #[serde(rename = "@tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "@tileheight")]
    pub tile_height: u32,
    pub image: TilesetImage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TilesetImage {
    #[serde(rename = "@source")]
    pub source: String,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
}

impl TilesetDocument {
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    /// Whole tiles across and down an image of the given size
    pub fn grid_size(&self, image_width: u32, image_height: u32) -> (u32, u32) {
        if self.tile_width == 0 || self.tile_height == 0 {
            return (0, 0);
        }
        (image_width / self.tile_width, image_height / self.tile_height)
    }
}

/// One drawable tile: an image and the part of it to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileImage {
    pub image: ImageHandle,
    pub region: AtlasRegion,
}

/// Global tile id -> tile image
#[derive(Debug, Default, Clone)]
pub struct TileLookup {
    tiles: HashMap<u32, TileImage>,
}

impl TileLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, gid: u32) -> Option<&TileImage> {
        self.tiles.get(&gid)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Register every tile of a sliced sheet, numbered from `first_gid`.
    ///
    /// Returns false, registering nothing, when the numbering would run past
    /// `MAX_GID`.
    pub fn insert_sheet(&mut self, first_gid: u32, image: ImageHandle, regions: &[AtlasRegion]) -> bool {
        if !gid_range_fits(first_gid, regions.len() as u64) {
            return false;
        }

        for (gid, region) in (first_gid..).zip(regions) {
            self.tiles.insert(
                gid,
                TileImage {
                    image,
                    region: *region,
                },
            );
        }
        true
    }

    /// Read a TSX file (relative to `map_dir`), load its image (relative to
    /// the TSX file) and register its tiles
    pub fn load_tileset(
        &mut self,
        map_dir: &Path,
        first_gid: u32,
        source: &str,
        registry: &mut AssetRegistry,
    ) -> Result<usize, LevelError> {
        let tsx_path = map_dir.join(source);
        let xml = std::fs::read_to_string(&tsx_path).map_err(|source| LevelError::Io {
            path: tsx_path.clone(),
            source,
        })?;

        let document = TilesetDocument::from_xml(&xml).map_err(|source| LevelError::Xml {
            path: tsx_path.clone(),
            source,
        })?;

        let invalid = |reason: String| LevelError::InvalidTileset {
            path: tsx_path.clone(),
            reason,
        };

        if document.tile_width == 0 || document.tile_height == 0 {
            return Err(invalid("zero tile size".to_string()));
        }

        let image_path = tsx_dir(&tsx_path).join(&document.image.source);
        let image = registry.load_file(&image_path)?;
        let (width, height) = registry
            .get(image)
            .map_or((0, 0), |asset| asset.image.dimensions());

        if (width, height) != (document.image.width, document.image.height) {
            warn!(
                "{}: image is {width}x{height} but the tileset declares {}x{}",
                tsx_path.display(),
                document.image.width,
                document.image.height
            );
        }

        let (cols, rows) = document.grid_size(width, height);
        let count = u64::from(cols) * u64::from(rows);
        if count > u64::from(MAX_TILES_PER_SHEET) {
            return Err(invalid(format!("{count} tiles in one sheet")));
        }
        if !gid_range_fits(first_gid, count) {
            return Err(invalid(format!("{count} tiles from gid {first_gid} exceed the gid range")));
        }

        let regions = slice_grid(width, height, document.tile_width, document.tile_height);
        self.insert_sheet(first_gid, image, &regions);
        Ok(regions.len())
    }
}

/// Whether `count` tiles numbered from `first_gid` stay within `MAX_GID`
fn gid_range_fits(first_gid: u32, count: u64) -> bool {
    count == 0 || u64::from(first_gid) + count - 1 <= u64::from(MAX_GID)
}

fn tsx_dir(tsx_path: &Path) -> PathBuf {
    tsx_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
