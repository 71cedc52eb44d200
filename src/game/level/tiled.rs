// Tiled JSON map document
//
// Only the fields the game reads are modelled; everything else in the file is
// ignored and missing optional fields fall back to their defaults.

use serde::Deserialize;

/// High bits of a GID that carry flip/rotation flags
const GID_FLAG_MASK: u32 = 0xE000_0000;

/// Largest GID that leaves the flag bits clear
pub const MAX_GID: u32 = !GID_FLAG_MASK;

/// Strip Tiled's flip flags from a global tile id
pub fn strip_gid_flags(gid: u32) -> u32 {
    gid & !GID_FLAG_MASK
}

/// Root of a Tiled JSON map
#[derive(Debug, Clone, Deserialize)]
pub struct TiledMap {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(rename = "tilewidth", default)]
    pub tile_width: u32,
    #[serde(rename = "tileheight", default)]
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
}

impl TiledMap {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Tile layers in file order
    pub fn tile_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.kind == LayerKind::TileLayer)
    }

    /// Object layers in file order
    pub fn object_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.kind == LayerKind::ObjectGroup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LayerKind {
    #[serde(rename = "tilelayer")]
    TileLayer,
    #[serde(rename = "objectgroup")]
    ObjectGroup,
    #[serde(rename = "imagelayer")]
    ImageLayer,
    #[serde(rename = "group")]
    Group,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TileLayer => "tilelayer",
            Self::ObjectGroup => "objectgroup",
            Self::ImageLayer => "imagelayer",
            Self::Group => "group",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: LayerKind,
    /// Row-major GIDs, 0 for empty cells
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Layer {
    /// GID at a cell, 0 when empty or outside the data
    pub fn gid_at(&self, x: u32, y: u32) -> u32 {
        if x >= self.width {
            return 0;
        }
        let idx = (y * self.width + x) as usize;
        self.data.get(idx).copied().map(strip_gid_flags).unwrap_or(0)
    }
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// An object placed on an object layer
#[derive(Debug, Clone, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub id: u32,
    /// Tile drawn for this object, 0 for none
    #[serde(default)]
    pub gid: u32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Game meaning of the object (`enemy`, `player_start`)
    #[serde(rename = "type", alias = "class", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl MapObject {
    pub fn tile_gid(&self) -> u32 {
        strip_gid_flags(self.gid)
    }
}

/// Custom property attached to a layer or object
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Reference from a map to an external TSX tileset
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetRef {
    #[serde(rename = "firstgid")]
    pub first_gid: u32,
    /// Path of the TSX file relative to the map; absent for embedded tilesets
    #[serde(default)]
    pub source: Option<String>,
}
