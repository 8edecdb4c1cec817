//! Triangle mesh primitive.

use glam::Vec3;
use prism_core::Material;
use prism_math::{rotate_xyz, Ray};

use crate::object::{Hit, Object};
use crate::triangle::Triangle;

/// A triangle mesh with its placement baked in.
///
/// The per-mesh transform (non-uniform scale, then rotation about x, y
/// and z in that order, then translation) is applied to every vertex once
/// at construction, so intersection works on plain world-space triangles.
pub struct Mesh {
    triangles: Vec<Triangle>,
    material: Material,
}

impl Mesh {
    /// Build a mesh from loader output (three vertex positions per
    /// triangle). Rotation angles are in radians.
    pub fn new(
        triangles: &[[Vec3; 3]],
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        material: Material,
    ) -> Self {
        let place = |v: Vec3| rotate_xyz(v * scale, rotation) + position;

        let triangles: Vec<Triangle> = triangles
            .iter()
            .map(|[a, b, c]| Triangle::new(place(*a), place(*b), place(*c), material.clone()))
            .collect();

        log::debug!("mesh baked: {} triangles", triangles.len());

        Self {
            triangles,
            material,
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Object for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        let mut min_t = f32::INFINITY;

        for triangle in &self.triangles {
            if let Some(hit) = triangle.intersect(ray) {
                if hit.t < min_t {
                    min_t = hit.t;
                    nearest = Some(hit);
                }
            }
        }

        nearest
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
