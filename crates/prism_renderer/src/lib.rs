//! Prism Renderer - recursive Whitted ray tracing on the CPU.
//!
//! Scenes are built in code from primitives (spheres, triangles, quads
//! and triangle meshes), point lights and Phong materials, then rendered
//! with shadow rays, mirror reflection, refraction and grid
//! supersampling.

mod image;
mod mesh;
mod object;
mod quad;
mod scene;
mod sphere;
mod triangle;

pub use image::{clamp_color, Image};
pub use mesh::Mesh;
pub use object::{Hit, Object};
pub use quad::Quad;
pub use scene::{reflect, Scene};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the shared scene-description and math types
pub use prism_core::{load_obj, Color, Light, Material, Texture, TextureCache};
pub use prism_math::{Ray, Vec3};
