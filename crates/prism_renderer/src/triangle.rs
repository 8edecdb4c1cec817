//! Triangle primitive.

use glam::Vec3;
use prism_core::Material;
use prism_math::Ray;

use crate::object::{Hit, Object};

/// A triangle defined by three vertices.
///
/// The face normal is precomputed at construction from the winding
/// (v1 - v0) x (v2 - v0).
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle. A degenerate (zero area) triangle gets a
    /// zero normal and never intersects.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }
}

impl Object for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        // Cramer's rule on  origin + t*dir = v0 + beta*(v1-v0) + gamma*(v2-v0),
        // with the system written over the columns (v0-v1), (v0-v2), dir.
        let col1 = self.v0 - self.v1;
        let col2 = self.v0 - self.v2;
        let rhs = self.v0 - ray.origin;
        let dir = ray.direction;

        let denom = col1.dot(col2.cross(dir));
        if denom.abs() < 1e-8 {
            return None; // parallel ray or degenerate triangle
        }

        let t = -col2.dot(col1.cross(rhs)) / denom;
        if t < 0.0 {
            return None;
        }

        let gamma = dir.dot(col1.cross(rhs)) / denom;
        if !(0.0..=1.0).contains(&gamma) {
            return None;
        }

        let beta = rhs.dot(col2.cross(dir)) / denom;
        if beta < 0.0 || beta > 1.0 - gamma {
            return None;
        }

        // Report the face normal oriented against the incoming ray.
        let normal = if self.normal.dot(dir) > 0.0 {
            -self.normal
        } else {
            self.normal
        };

        Some(Hit::new(t, normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
