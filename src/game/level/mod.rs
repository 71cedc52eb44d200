// Levels: Tiled maps loaded from disk, or a generated fallback
//
// - `tiled`: serde model of the Tiled JSON map format
// - `tileset`: TSX tileset parsing and the GID -> tile image lookup

pub mod tiled;
pub mod tileset;

pub use tiled::{Layer, LayerKind, MapObject, TiledMap};
pub use tileset::{TileImage, TileLookup};

use glam::{Vec2, Vec4};
use log::{debug, info, warn};
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::config::{GameConfig, LOGICAL_HEIGHT, LOGICAL_WIDTH, TILE_SIZE};
use crate::engine::assets::{AssetError, AssetRegistry};
use crate::game::enemy::{Enemy, EnemyKind};

/// Object type that places an enemy
const ENEMY_OBJECT: &str = "enemy";
/// Object type that marks where the player appears
const PLAYER_START_OBJECT: &str = "player_start";

const FALLBACK_LEVEL_NAME: &str = "Forest Level";
const FALLBACK_SPAWN: Vec2 = Vec2::new(100.0, 100.0);

/// Level loading errors
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse map {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse tileset {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid tileset {path}: {reason}")]
    InvalidTileset { path: PathBuf, reason: String },

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Terrain of a generated level cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileType {
    #[default]
    Grass,
    Water,
    Tree,
    Stone,
    Sand,
}

impl TileType {
    /// Solid colour the cell is drawn with
    pub fn color(&self) -> Vec4 {
        let [r, g, b] = match self {
            Self::Grass => [100, 200, 50],
            Self::Water => [50, 100, 200],
            Self::Tree => [0, 100, 0],
            Self::Stone | Self::Sand => [200, 200, 200],
        };
        Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }
}

/// Where a level's terrain comes from
#[derive(Debug, Clone)]
pub enum LevelLayout {
    /// Hand-built grid, indexed `[row][column]`
    Grid(Vec<Vec<TileType>>),
    /// Map authored in Tiled
    Tiled(TiledMap),
}

/// A playable level
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub layout: LevelLayout,
    pub tiles: TileLookup,
    pub enemies: Vec<Enemy>,
    /// Player start marker, if the level has one
    pub spawn: Option<Vec2>,
    /// Size in tiles
    pub width: u32,
    pub height: u32,
}

impl Level {
    /// Load a Tiled JSON map and its tilesets
    pub fn load_tiled(path: &Path, registry: &mut AssetRegistry) -> Result<Self, LevelError> {
        info!("Loading level from {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let map_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_json_str(&json, path, &name, map_dir, registry)
    }

    /// Build a level from Tiled JSON text; `path` is only used in errors
    pub fn from_json_str(
        json: &str,
        path: &Path,
        name: &str,
        map_dir: &Path,
        registry: &mut AssetRegistry,
    ) -> Result<Self, LevelError> {
        let map = TiledMap::from_json(json).map_err(|source| LevelError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if map.width == 0 || map.height == 0 {
            return Err(LevelError::InvalidDimensions {
                width: map.width,
                height: map.height,
            });
        }

        let mut tiles = TileLookup::new();
        for tileset in &map.tilesets {
            let Some(source) = tileset.source.as_deref() else {
                warn!(
                    "Skipping embedded tileset at firstgid {}: only TSX tilesets are supported",
                    tileset.first_gid
                );
                continue;
            };

            match tiles.load_tileset(map_dir, tileset.first_gid, source, registry) {
                Ok(count) => debug!("Tileset {source}: {count} tiles from gid {}", tileset.first_gid),
                Err(e) => warn!("Skipping tileset {source}: {e}"),
            }
        }

        let mut enemies = Vec::new();
        let mut spawn = None;
        for object in map.object_layers().flat_map(|layer| &layer.objects) {
            match object.kind.as_str() {
                ENEMY_OBJECT => enemies.push(Enemy::new(
                    EnemyKind::from_name(&object.name),
                    Vec2::new(object.x, object.y),
                )),
                PLAYER_START_OBJECT => spawn = Some(Vec2::new(object.x, object.y)),
                _ => {}
            }
        }

        Ok(Self {
            name: name.to_string(),
            width: map.width,
            height: map.height,
            layout: LevelLayout::Tiled(map),
            tiles,
            enemies,
            spawn,
        })
    }

    /// Generated grass level with a single goblin on a random interior tile
    pub fn fallback(rng: &mut impl Rng) -> Self {
        let width = LOGICAL_WIDTH as u32 / TILE_SIZE;
        let height = LOGICAL_HEIGHT as u32 / TILE_SIZE;

        let goblin_tile = Vec2::new(
            rng.gen_range(1..width - 1) as f32,
            rng.gen_range(1..height - 1) as f32,
        );

        Self {
            name: FALLBACK_LEVEL_NAME.to_string(),
            layout: LevelLayout::Grid(vec![vec![TileType::Grass; width as usize]; height as usize]),
            tiles: TileLookup::new(),
            enemies: vec![Enemy::new(EnemyKind::Goblin, goblin_tile * TILE_SIZE as f32)],
            spawn: Some(FALLBACK_SPAWN),
            width,
            height,
        }
    }

    /// Tiled map behind this level, if any
    pub fn tiled_map(&self) -> Option<&TiledMap> {
        match &self.layout {
            LevelLayout::Tiled(map) => Some(map),
            LevelLayout::Grid(_) => None,
        }
    }

    /// Pixel size of one cell
    pub fn tile_size(&self) -> Vec2 {
        match &self.layout {
            LevelLayout::Tiled(map) => Vec2::new(map.tile_width as f32, map.tile_height as f32),
            LevelLayout::Grid(_) => Vec2::splat(TILE_SIZE as f32),
        }
    }

    /// One line per layer, for the debug log
    pub fn layer_summary(&self) -> Vec<String> {
        let Some(map) = self.tiled_map() else {
            return Vec::new();
        };

        let mut lines = vec![format!("Layers: {}", map.layers.len())];
        lines.extend(map.layers.iter().enumerate().map(|(i, layer)| {
            format!(
                "Layer {i}: {} ({}, visible: {})",
                layer.name,
                layer.kind.as_str(),
                layer.visible
            )
        }));
        lines
    }
}

/// Build the level list. Never fails: a missing or broken map yields the
/// fallback level.
pub fn create_levels(
    config: &GameConfig,
    registry: &mut AssetRegistry,
    rng: &mut impl Rng,
) -> Vec<Level> {
    if !config.maps_dir.is_dir() {
        warn!(
            "Map directory {} does not exist, using the fallback level",
            config.maps_dir.display()
        );
        return vec![Level::fallback(rng)];
    }

    let level = match Level::load_tiled(&config.map_path, registry) {
        Ok(level) => {
            info!(
                "Loaded level {} ({}x{} tiles, {} enemies)",
                level.name,
                level.width,
                level.height,
                level.enemies.len()
            );
            for line in level.layer_summary() {
                debug!("{line}");
            }
            level
        }
        Err(e) => {
            warn!("Failed to load {}: {e}; using the fallback level", config.map_path.display());
            Level::fallback(rng)
        }
    };

    vec![level]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetLoader;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MINIMAL_MAP: &str = r#"{
        "width": 2, "height": 2, "tilewidth": 64, "tileheight": 64,
        "layers": [
            {"name": "ground", "type": "tilelayer", "data": [1, 2, 3, 4],
             "width": 2, "height": 2, "visible": true, "opacity": 1},
            {"name": "actors", "type": "objectgroup", "visible": true, "objects": [
                {"id": 1, "type": "player_start", "name": "start", "x": 64, "y": 32},
                {"id": 2, "type": "enemy", "name": "bat", "x": 100, "y": 80}
            ]}
        ],
        "tilesets": []
    }"#;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("adventure-game-level-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn registry() -> AssetRegistry {
        AssetRegistry::load(AssetLoader::new(
            std::env::temp_dir().join("adventure-game-level-no-assets"),
        ))
    }

    fn config_for(root: &Path) -> GameConfig {
        GameConfig {
            asset_root: root.to_path_buf(),
            maps_dir: root.join("maps/forest"),
            map_path: root.join("maps/forest/forest.json"),
            ..GameConfig::default()
        }
    }

    fn assert_is_fallback(levels: &[Level]) {
        assert_eq!(levels.len(), 1);
        let level = &levels[0];
        assert_eq!(level.name, "Forest Level");
        assert_eq!(level.spawn, Some(Vec2::new(100.0, 100.0)));
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.enemies[0].kind, EnemyKind::Goblin);
    }

    #[test]
    fn test_minimal_map() {
        let mut registry = registry();
        let level = Level::from_json_str(
            MINIMAL_MAP,
            Path::new("mini.json"),
            "mini.json",
            Path::new("."),
            &mut registry,
        )
        .unwrap();

        assert_eq!(level.spawn, Some(Vec2::new(64.0, 32.0)));
        assert_eq!(level.enemies.len(), 1);

        let bat = &level.enemies[0];
        assert_eq!(bat.kind, EnemyKind::Bat);
        assert_eq!(bat.position, Vec2::new(100.0, 80.0));
        assert_eq!((bat.health, bat.speed, bat.damage), (30, 1.5, 10));

        assert_eq!((level.width, level.height), (2, 2));
        assert_eq!(level.tile_size(), Vec2::new(64.0, 64.0));
        assert!(level.tiles.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut registry = registry();
        let err = Level::from_json_str(
            r#"{"width": 0, "height": 5, "layers": []}"#,
            Path::new("bad.json"),
            "bad.json",
            Path::new("."),
            &mut registry,
        )
        .unwrap_err();
        assert!(matches!(err, LevelError::InvalidDimensions { width: 0, height: 5 }));
    }

    #[test]
    fn test_missing_tileset_is_skipped() {
        let mut registry = registry();
        let json = MINIMAL_MAP.replace(
            r#""tilesets": []"#,
            r#""tilesets": [{"firstgid": 1, "source": "nowhere.tsx"}]"#,
        );
        let level = Level::from_json_str(
            &json,
            Path::new("m.json"),
            "m.json",
            &temp_dir("no-tsx"),
            &mut registry,
        )
        .unwrap();
        assert!(level.tiles.is_empty());
        assert_eq!(level.enemies.len(), 1);
    }

    #[test]
    fn test_load_tiled_from_disk() {
        let root = temp_dir("disk");
        let config = config_for(&root);
        std::fs::create_dir_all(&config.maps_dir).unwrap();
        std::fs::write(&config.map_path, MINIMAL_MAP).unwrap();

        let mut registry = registry();
        let levels = create_levels(&config, &mut registry, &mut StdRng::seed_from_u64(1));
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].name, "forest.json");
        assert_eq!(levels[0].spawn, Some(Vec2::new(64.0, 32.0)));
    }

    #[test]
    fn test_missing_map_dir_falls_back() {
        let root = temp_dir("no-maps");
        let levels = create_levels(&config_for(&root), &mut registry(), &mut StdRng::seed_from_u64(7));
        assert_is_fallback(&levels);
    }

    #[test]
    fn test_missing_map_file_falls_back() {
        let root = temp_dir("no-file");
        let config = config_for(&root);
        std::fs::create_dir_all(&config.maps_dir).unwrap();

        let levels = create_levels(&config, &mut registry(), &mut StdRng::seed_from_u64(7));
        assert_is_fallback(&levels);
    }

    #[test]
    fn test_malformed_map_falls_back() {
        let root = temp_dir("malformed");
        let config = config_for(&root);
        std::fs::create_dir_all(&config.maps_dir).unwrap();
        std::fs::write(&config.map_path, "{ this is not json").unwrap();

        let levels = create_levels(&config, &mut registry(), &mut StdRng::seed_from_u64(7));
        assert_is_fallback(&levels);
    }

    #[test]
    fn test_fallback_goblin_on_interior_tile() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let level = Level::fallback(&mut rng);
            assert_eq!((level.width, level.height), (30, 16));

            let goblin = level.enemies[0].position;
            let (col, row) = (goblin.x / 64.0, goblin.y / 64.0);
            assert_eq!(col.fract(), 0.0);
            assert!(col >= 1.0 && col <= 28.0);
            assert!(row >= 1.0 && row <= 14.0);
        }
    }

    #[test]
    fn test_fallback_grid_is_grass() {
        let level = Level::fallback(&mut StdRng::seed_from_u64(3));
        let LevelLayout::Grid(rows) = &level.layout else {
            panic!("fallback level should be a grid");
        };
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|row| row.len() == 30));
        assert!(rows.iter().flatten().all(|t| *t == TileType::Grass));
        assert!(level.layer_summary().is_empty());
    }

    #[test]
    fn test_layer_summary() {
        let mut registry = registry();
        let level = Level::from_json_str(
            MINIMAL_MAP,
            Path::new("mini.json"),
            "mini.json",
            Path::new("."),
            &mut registry,
        )
        .unwrap();

        assert_eq!(
            level.layer_summary(),
            vec![
                "Layers: 2".to_string(),
                "Layer 0: ground (tilelayer, visible: true)".to_string(),
                "Layer 1: actors (objectgroup, visible: true)".to_string(),
            ]
        );
    }
}
