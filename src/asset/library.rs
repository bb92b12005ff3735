//! Sprite library
//!
//! Loads one PNG per `SpriteId`, falling back to a placeholder per sprite.

use std::path::{Path, PathBuf};
use crate::rasterizer::Sprite;
use super::{AssetError, SpriteId};

/// Default sprite directory, relative to the working directory
pub const SPRITES_DIR: &str = "assets/sprites";

pub struct SpriteLibrary {
    base_dir: PathBuf,
    sprites: Vec<Sprite>,
    /// Which entries are real images (false = placeholder)
    loaded: Vec<bool>,
}

/// Decode an image file into an RGBA sprite
pub fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let bytes = std::fs::read(path)?;
    decode_sprite(&bytes)
}

/// Decode in-memory image bytes into an RGBA sprite
pub fn decode_sprite(bytes: &[u8]) -> Result<Sprite, AssetError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty);
    }
    Ok(Sprite {
        width: width as usize,
        height: height as usize,
        pixels: rgba.into_raw(),
    })
}

impl SpriteLibrary {
    /// Placeholders only
    pub fn placeholders() -> Self {
        Self {
            base_dir: PathBuf::new(),
            sprites: SpriteId::ALL.iter().map(|id| Sprite::solid(id.placeholder_color())).collect(),
            loaded: vec![false; SpriteId::ALL.len()],
        }
    }

    /// Load every sprite from `base_dir`, substituting placeholders on failure
    pub fn load(base_dir: impl Into<PathBuf>) -> Self {
        let mut lib = Self::placeholders();
        lib.base_dir = base_dir.into();

        for id in SpriteId::ALL {
            let path = lib.base_dir.join(format!("{}.png", id.file_stem()));
            match load_sprite(&path) {
                Ok(sprite) => {
                    lib.sprites[id.index()] = sprite;
                    lib.loaded[id.index()] = true;
                }
                Err(e) => {
                    log::warn!("Sprite {} unavailable ({}), using placeholder", path.display(), e);
                }
            }
        }
        log::info!("Loaded {}/{} sprites from {}", lib.loaded_count(), SpriteId::ALL.len(), lib.base_dir.display());
        lib
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.index()]
    }

    pub fn is_placeholder(&self, id: SpriteId) -> bool {
        !self.loaded[id.index()]
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.iter().filter(|l| **l).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_missing_dir_gives_placeholders() {
        let lib = SpriteLibrary::load("/no/such/sprite/dir");
        assert_eq!(lib.loaded_count(), 0);
        for id in SpriteId::ALL {
            assert!(lib.is_placeholder(id));
            assert_eq!(lib.get(id).width, 1);
        }
    }

    #[test]
    fn test_loads_png_and_falls_back_on_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("player.png"), png_bytes(4, 6)).unwrap();
        std::fs::write(dir.path().join("hazard.png"), b"not a png").unwrap();

        let lib = SpriteLibrary::load(dir.path());
        assert!(!lib.is_placeholder(SpriteId::Player));
        assert_eq!(lib.get(SpriteId::Player).width, 4);
        assert_eq!(lib.get(SpriteId::Player).height, 6);
        assert_eq!(&lib.get(SpriteId::Player).pixels[0..4], &[10, 20, 30, 255]);
        assert!(lib.is_placeholder(SpriteId::Hazard));
        assert_eq!(lib.loaded_count(), 1);
    }

    #[test]
    fn test_decode_error_variant() {
        assert!(matches!(decode_sprite(b"nope"), Err(AssetError::Decode(_))));
    }
}
