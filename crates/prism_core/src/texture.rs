//! Texture loading and caching for materials.
//!
//! Textures are decoded from disk with the `image` crate and held as flat
//! RGB float grids. A [`TextureCache`] deduplicates loads so scene
//! construction can hand the same `Arc<Texture>` to several materials.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::material::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to load texture: {0}")]
    LoadError(String),

    #[error("image decoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// RGB pixels in [0, 1], row-major, row 0 at the top of the image
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from raw pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Decode a texture from an image file.
    ///
    /// 8-bit channels map straight to [0, 1]; no transfer-function decode.
    pub fn from_file(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| TextureError::LoadError(format!("{}: {}", path.display(), e)))?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels: Vec<Color> = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        Ok(Self::new(
            width,
            height,
            pixels,
            path.to_string_lossy().to_string(),
        ))
    }

    /// Sample the texture at (u, v) in [0, 1]^2 with bilinear filtering.
    ///
    /// The mapping is direct: v = 0 reads the top image row. Callers with
    /// "v grows upward" coordinates pass `1 - v`, as the shading layer does.
    pub fn color_at(&self, u: f32, v: f32) -> Color {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = v * (self.height as f32 - 1.0);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        // Bilinear blend of the four neighbors
        let top = self.pixel(x0, y0) * (1.0 - fx) + self.pixel(x1, y0) * fx;
        let bottom = self.pixel(x0, y1) * (1.0 - fx) + self.pixel(x1, y1) * fx;

        top * (1.0 - fy) + bottom * fy
    }

    /// Get pixel at integer coordinates.
    fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on demand and cached by path for reuse.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using the cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(Texture::from_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "loaded texture: {} ({}x{})",
            path,
            texture.width,
            texture.height
        );

        Ok(texture)
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Clear all cached textures.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
