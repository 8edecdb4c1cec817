//! Quad primitive, decomposed into two triangles.

use glam::Vec3;
use prism_core::Material;
use prism_math::Ray;

use crate::object::{Hit, Object};
use crate::triangle::Triangle;

/// A quadrilateral split at construction into the triangles
/// (v0, v1, v2) and (v0, v2, v3).
///
/// Callers supply the corners in winding order around a convex outline,
/// so the diagonal v0-v2 lies inside the quad.
pub struct Quad {
    first: Triangle,
    second: Triangle,
    material: Material,
}

impl Quad {
    /// Create a new quad from four corners.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3, material: Material) -> Self {
        Self {
            first: Triangle::new(v0, v1, v2, material.clone()),
            second: Triangle::new(v0, v2, v3, material.clone()),
            material,
        }
    }
}

impl Object for Quad {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        let mut min_t = f32::INFINITY;

        for triangle in [&self.first, &self.second] {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Quad {
        Quad::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Material::default(),
        )
    }

    #[test]
    fn test_quad_center_hit_matches_triangle() {
        let quad = unit_quad();
        let triangle = Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Material::default(),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let quad_hit = quad.intersect(&ray).unwrap();
        let triangle_hit = triangle.intersect(&ray).unwrap();
        assert_eq!(quad_hit.t, triangle_hit.t);
        assert_eq!(quad_hit.t, 5.0);
    }

    #[test]
    fn test_quad_covers_both_halves() {
        let quad = unit_quad();

        // (-0.5, 0.5) lies in the (v0, v2, v3) half only
        let ray = Ray::new(Vec3::new(-0.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = quad.intersect(&ray).unwrap();
        assert_eq!(hit.t, 5.0);
    }

    #[test]
    fn test_quad_miss_outside() {
        let quad = unit_quad();
        let ray = Ray::new(Vec3::new(3.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(quad.intersect(&ray).is_none());
    }
}
