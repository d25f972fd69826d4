//! Target icon loading for the shell
//!
//! Decodes icon files from the asset directory into egui textures and caches
//! them by logical name. A missing or undecodable icon resolves to a generated
//! placeholder so the tile still renders.

#![warn(clippy::all, rust_2018_idioms)]

use egui::{Color32, ColorImage, Context, TextureHandle, TextureOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Edge length of the generated placeholder, in pixels
const PLACEHOLDER_SIZE: usize = 32;

/// Result of resolving a logical icon name
#[derive(Clone)]
pub enum IconHandle {
    Loaded(TextureHandle),
    Missing(TextureHandle),
}

impl IconHandle {
    pub fn texture(&self) -> &TextureHandle {
        match self {
            IconHandle::Loaded(texture) | IconHandle::Missing(texture) => texture,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, IconHandle::Missing(_))
    }
}

/// Texture cache for target icons
pub struct IconCache {
    asset_dir: PathBuf,
    /// Resolved handles keyed by logical name, misses included
    cache: HashMap<String, IconHandle>,
    placeholder: Option<TextureHandle>,
}

impl IconCache {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            cache: HashMap::new(),
            placeholder: None,
        }
    }

    /// Resolve `name` to a texture, loading it on first use
    pub fn resolve(&mut self, ctx: &Context, name: &str) -> IconHandle {
        if let Some(handle) = self.cache.get(name) {
            return handle.clone();
        }

        let path = self.asset_dir.join(name);
        let handle = match load_color_image(&path) {
            Ok(image) => {
                debug!("Loaded icon {:?}", path);
                IconHandle::Loaded(ctx.load_texture(
                    format!("icon:{}", name),
                    image,
                    TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!("Icon {:?} unavailable, using placeholder: {}", path, e);
                IconHandle::Missing(self.placeholder_texture(ctx))
            }
        };

        self.cache.insert(name.to_string(), handle.clone());
        handle
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn placeholder_texture(&mut self, ctx: &Context) -> TextureHandle {
        self.placeholder
            .get_or_insert_with(|| {
                ctx.load_texture("icon:placeholder", placeholder_image(), TextureOptions::NEAREST)
            })
            .clone()
    }
}

/// Decode an image file into RGBA pixels
pub fn load_color_image(path: &Path) -> Result<ColorImage, String> {
    let image = image::open(path).map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
}

/// Grey checkerboard with a diagonal cross
pub fn placeholder_image() -> ColorImage {
    let light = Color32::from_gray(110);
    let dark = Color32::from_gray(70);
    let mark = Color32::from_rgb(200, 60, 60);

    let mut rgba = Vec::with_capacity(PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4);
    for y in 0..PLACEHOLDER_SIZE {
        for x in 0..PLACEHOLDER_SIZE {
            let color = if x == y || x + y == PLACEHOLDER_SIZE - 1 {
                mark
            } else if (x / 8 + y / 8) % 2 == 0 {
                light
            } else {
                dark
            };
            rgba.extend_from_slice(&color.to_array());
        }
    }
    ColorImage::from_rgba_unmultiplied([PLACEHOLDER_SIZE, PLACEHOLDER_SIZE], &rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_dimensions() {
        let image = placeholder_image();
        assert_eq!(image.size, [PLACEHOLDER_SIZE, PLACEHOLDER_SIZE]);
        assert_eq!(image.pixels.len(), PLACEHOLDER_SIZE * PLACEHOLDER_SIZE);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_color_image(&dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_color_image(&path).unwrap();
        assert_eq!(loaded.size, [3, 2]);
        assert_eq!(loaded.pixels[0], Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_missing_icon_resolves_to_placeholder_once() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::default();
        let mut cache = IconCache::new(dir.path());

        let first = cache.resolve(&ctx, "ghost.png");
        let second = cache.resolve(&ctx, "ghost.png");
        let other = cache.resolve(&ctx, "other.png");

        assert!(first.is_missing());
        assert_eq!(first.texture().id(), second.texture().id());
        assert_eq!(first.texture().id(), other.texture().id());
        assert_eq!(cache.cached_count(), 2);
    }

    #[test]
    fn test_existing_icon_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
            .save(dir.path().join("blue.png"))
            .unwrap();
        let ctx = Context::default();
        let mut cache = IconCache::new(dir.path());

        let handle = cache.resolve(&ctx, "blue.png");
        assert!(!handle.is_missing());
        assert_eq!(handle.texture().size(), [4, 4]);
    }
}
