//! Phong surface materials.

use std::sync::Arc;

use glam::Vec3;

use crate::texture::Texture;

/// Color as an RGB triple. Alias of `Vec3` so color math is vector math.
pub type Color = Vec3;

/// Reflectance description of a surface.
///
/// The coefficients follow the classic Phong model: `ambient`, `diffuse`
/// and `specular` weight the three local illumination terms, `shininess`
/// is the specular exponent. `specular` additionally weights the mirror
/// reflection term for opaque surfaces. Transparent surfaces refract with
/// `refractive_index` and blend reflection against transmission with a
/// Fresnel estimate instead of the flat mirror term.
#[derive(Debug, Clone)]
pub struct Material {
    /// Ambient coefficient.
    pub ambient: f32,
    /// Diffuse coefficient.
    pub diffuse: f32,
    /// Specular coefficient; doubles as the mirror reflection weight.
    pub specular: f32,
    /// Flat surface color, used wherever no texture sample applies.
    pub color: Color,
    /// Phong specular exponent.
    pub shininess: f32,
    /// Optional image texture, sampled through the owning object's UV
    /// mapping. Shared so several materials can reference one image.
    pub texture: Option<Arc<Texture>>,
    /// Whether the surface transmits light.
    pub is_transparent: bool,
    /// Index of refraction, only meaningful when `is_transparent` is set.
    pub refractive_index: f32,
}

impl Material {
    /// Opaque material with a flat color.
    pub fn new(color: Color, ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            color,
            shininess,
            ..Self::default()
        }
    }

    /// Opaque material whose base color comes from a texture.
    ///
    /// Objects without a UV mapping fall back to the flat color, which
    /// stays at the default gray here.
    pub fn textured(
        texture: Arc<Texture>,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        shininess: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            texture: Some(texture),
            ..Self::default()
        }
    }

    /// Transparent dielectric (glass-like) material.
    pub fn transparent(
        color: Color,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        shininess: f32,
        refractive_index: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            color,
            shininess,
            is_transparent: true,
            refractive_index,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 0.8,
            specular: 0.2,
            color: Color::new(0.8, 0.8, 0.8),
            shininess: 32.0,
            texture: None,
            is_transparent: false,
            refractive_index: 1.0,
        }
    }
}
