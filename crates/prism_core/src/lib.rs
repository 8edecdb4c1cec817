//! Prism Core - materials, lights, and asset loading for the ray tracer.
//!
//! This crate provides:
//!
//! - **Surface description**: [`Material`] (Phong coefficients, optional
//!   texture, optional transparency) and [`Light`] (point light)
//! - **Textures**: image-backed [`Texture`] with bilinear sampling, plus a
//!   path-keyed [`TextureCache`] for sharing decoded images
//! - **OBJ ingestion**: [`load_obj`] flattens a triangulated OBJ into the
//!   triangle-position list the mesh primitive consumes
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{Material, TextureCache};
//!
//! let mut textures = TextureCache::with_base_dir("assets");
//! let earth = textures.load("earth.png")?;
//! let material = Material::textured(earth, 0.2, 0.7, 0.5, 64.0);
//! ```

pub mod light;
pub mod material;
pub mod obj;
pub mod texture;

// Re-export commonly used types
pub use light::Light;
pub use material::{Color, Material};
pub use obj::{load_obj, ObjError};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
