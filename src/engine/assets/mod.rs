// Asset management system
//
// Loads images from the asset root once at startup, substitutes solid-colour
// placeholders for anything missing, and hands out stable handles that the
// renderer mirrors as GPU textures.

mod atlas;
mod loader;
mod registry;

pub use atlas::{slice_grid, AtlasRegion};
pub use loader::{AssetLoader, AssetType};
pub use registry::{AssetRegistry, ImageAsset, ImageHandle, CHARACTER_SPRITE_PATHS};

use std::path::PathBuf;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound(PathBuf::from("test.png"));
        assert_eq!(err.to_string(), "Asset not found: test.png");
    }
}
