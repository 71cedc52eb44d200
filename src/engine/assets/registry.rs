// Image registry: character sprites, UI images and tileset sheets

use super::loader::{load_image_file, AssetLoader};
use super::AssetError;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Character sprites below `images/`, in the order sprite indices refer to
pub const CHARACTER_SPRITE_PATHS: [&str; 36] = [
    // Standing
    "standing/stand_back.png",
    "standing/stand_forward.png",
    "standing/stand_left.png",
    "standing/stand_right.png",
    // Running
    "running/run_down/1.png",
    "running/run_down/2.png",
    "running/run_down/3.png",
    "running/run_down/4.png",
    "running/run_forward/1.png",
    "running/run_forward/2.png",
    "running/run_forward/3.png",
    "running/run_forward/4.png",
    "running/run_right/1.png",
    "running/run_right/2.png",
    "running/run_right/3.png",
    "running/run_right/4.png",
    "running/run_left/1.png",
    "running/run_left/2.png",
    "running/run_left/3.png",
    "running/run_left/4.png",
    // Attacking
    "attack/down/1.png",
    "attack/down/2.png",
    "attack/down/3.png",
    "attack/down/4.png",
    "attack/forward/1.png",
    "attack/forward/2.png",
    "attack/forward/3.png",
    "attack/forward/4.png",
    "attack/right/1.png",
    "attack/right/2.png",
    "attack/right/3.png",
    "attack/right/4.png",
    "attack/left/1.png",
    "attack/left/2.png",
    "attack/left/3.png",
    "attack/left/4.png",
];

const HEART_PATH: &str = "ui/heart.png";
const BROKEN_HEART_PATH: &str = "ui/broken_heart.png";

// Placeholder looks
const CHARACTER_PLACEHOLDER_SIZE: u32 = 64;
const CHARACTER_PLACEHOLDER: Rgba<u8> = Rgba([255, 0, 255, 255]);
const HEART_PLACEHOLDER_SIZE: u32 = 8;
const HEART_PLACEHOLDER: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BROKEN_HEART_PLACEHOLDER: Rgba<u8> = Rgba([100, 0, 0, 255]);

/// Index of an image in the registry; the renderer keeps textures in the same order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(usize);

impl ImageHandle {
    /// 1x1 white image used for solid-colour quads
    pub const SOLID: ImageHandle = ImageHandle(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A decoded image and the name it was registered under
#[derive(Debug)]
pub struct ImageAsset {
    pub name: String,
    pub image: RgbaImage,
}

impl ImageAsset {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }
}

/// Every image the game draws, loaded once and never evicted
#[derive(Debug)]
pub struct AssetRegistry {
    loader: AssetLoader,
    images: Vec<ImageAsset>,
    by_path: HashMap<PathBuf, ImageHandle>,
    character: Vec<ImageHandle>,
    heart: ImageHandle,
    broken_heart: ImageHandle,
}

impl AssetRegistry {
    /// Load character sprites and UI images below the loader's root.
    ///
    /// Never fails: anything missing or undecodable is replaced by a
    /// placeholder and logged.
    pub fn load(loader: AssetLoader) -> Self {
        let mut registry = Self {
            loader,
            images: Vec::new(),
            by_path: HashMap::new(),
            character: Vec::with_capacity(CHARACTER_SPRITE_PATHS.len()),
            heart: ImageHandle::SOLID,
            broken_heart: ImageHandle::SOLID,
        };

        registry.push("solid", RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));

        let mut missing = 0;
        for path in CHARACTER_SPRITE_PATHS {
            let handle = registry.load_or_placeholder(
                path,
                CHARACTER_PLACEHOLDER_SIZE,
                CHARACTER_PLACEHOLDER,
            );
            if registry.images[handle.0].name.starts_with("placeholder:") {
                missing += 1;
            }
            registry.character.push(handle);
        }

        if missing > 0 {
            warn!(
                "Loaded only {} of {} character sprites",
                CHARACTER_SPRITE_PATHS.len() - missing,
                CHARACTER_SPRITE_PATHS.len()
            );
        } else {
            info!("Loaded {} character sprites", CHARACTER_SPRITE_PATHS.len());
        }

        registry.heart =
            registry.load_or_placeholder(HEART_PATH, HEART_PLACEHOLDER_SIZE, HEART_PLACEHOLDER);
        registry.broken_heart = registry.load_or_placeholder(
            BROKEN_HEART_PATH,
            HEART_PLACEHOLDER_SIZE,
            BROKEN_HEART_PLACEHOLDER,
        );

        registry
    }

    fn push(&mut self, name: impl Into<String>, image: RgbaImage) -> ImageHandle {
        let handle = ImageHandle(self.images.len());
        self.images.push(ImageAsset {
            name: name.into(),
            image,
        });
        handle
    }

    fn load_or_placeholder(&mut self, name: &str, size: u32, color: Rgba<u8>) -> ImageHandle {
        match self.loader.load_image(name) {
            Ok(image) => self.push(name, image),
            Err(e) => {
                warn!("Failed to load {name}: {e}; using placeholder");
                self.push(
                    format!("placeholder:{name}"),
                    RgbaImage::from_pixel(size, size, color),
                )
            }
        }
    }

    /// Load an image by absolute path, reusing it if it was loaded before
    pub fn load_file(&mut self, path: &Path) -> Result<ImageHandle, AssetError> {
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }

        let image = load_image_file(path)?;
        let handle = self.push(path.to_string_lossy(), image);
        self.by_path.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    pub fn get(&self, handle: ImageHandle) -> Option<&ImageAsset> {
        self.images.get(handle.0)
    }

    /// All images in handle order
    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Character sprite by index, see `CHARACTER_SPRITE_PATHS`
    pub fn character_sprite(&self, index: usize) -> ImageHandle {
        self.character
            .get(index)
            .copied()
            .unwrap_or(ImageHandle::SOLID)
    }

    /// Unscaled size of the first character sprite
    pub fn character_size(&self) -> Vec2 {
        self.get(self.character_sprite(0))
            .map(ImageAsset::size)
            .unwrap_or(Vec2::splat(CHARACTER_PLACEHOLDER_SIZE as f32))
    }

    pub fn heart(&self) -> ImageHandle {
        self.heart
    }

    pub fn broken_heart(&self) -> ImageHandle {
        self.broken_heart
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}
