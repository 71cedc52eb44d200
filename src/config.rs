// Game configuration: window, logical canvas and asset locations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Logical canvas size; everything is laid out in these pixels
pub const LOGICAL_WIDTH: f32 = 1920.0;
pub const LOGICAL_HEIGHT: f32 = 1080.0;

/// Edge length of a map tile in pixels
pub const TILE_SIZE: u32 = 64;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Root of all game data (`images/`, `maps/`)
    pub asset_root: PathBuf,
    /// Directory that must exist for the map to be tried at all
    pub maps_dir: PathBuf,
    /// Tiled JSON map of the first level
    pub map_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Adventure Game".to_string(),
            // Opens at half the logical resolution
            window_width: LOGICAL_WIDTH as u32 / 2,
            window_height: LOGICAL_HEIGHT as u32 / 2,
            asset_root: PathBuf::from("data"),
            maps_dir: PathBuf::from("data/maps/forest"),
            map_path: PathBuf::from("data/maps/forest/forest.json"),
        }
    }
}

impl GameConfig {
    /// Make every path absolute against `base`
    pub fn resolved_against(mut self, base: &Path) -> Self {
        self.asset_root = absolutize(base, &self.asset_root);
        self.maps_dir = absolutize(base, &self.maps_dir);
        self.map_path = absolutize(base, &self.map_path);
        self
    }

    /// Make every path absolute against the working directory
    pub fn resolve(self) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to resolve the working directory")?;
        Ok(self.resolved_against(&cwd))
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.title, "Adventure Game");
        assert_eq!((config.window_width, config.window_height), (960, 540));
        assert_eq!(config.map_path, PathBuf::from("data/maps/forest/forest.json"));
    }

    #[test]
    fn test_resolve_against_base() {
        let base = std::env::temp_dir();
        let config = GameConfig::default().resolved_against(&base);
        assert!(config.asset_root.is_absolute());
        assert_eq!(config.map_path, base.join("data/maps/forest/forest.json"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let absolute = std::env::temp_dir().join("maps/level.json");
        let config = GameConfig {
            map_path: absolute.clone(),
            ..GameConfig::default()
        }
        .resolved_against(Path::new("/elsewhere"));
        assert_eq!(config.map_path, absolute);
    }

    #[test]
    fn test_resolve_uses_working_directory() {
        let config = GameConfig::default().resolve().unwrap();
        assert!(config.maps_dir.is_absolute());
    }
}
