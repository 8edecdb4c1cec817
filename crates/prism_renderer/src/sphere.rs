//! Sphere primitive.

use std::f32::consts::PI;

use glam::Vec3;
use prism_core::Material;
use prism_math::{rotate_xyz, solve_quadratic, Ray};

use crate::object::{Hit, Object};

/// A sphere with an optional texture orientation.
///
/// The orientation (axis plus angle in degrees) only affects `to_uv`;
/// the geometry itself is rotation invariant.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    axis: Vec3,
    angle: f32,
}

impl Sphere {
    /// Create a sphere with the default (unrotated) texture orientation.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self::with_rotation(center, radius, material, Vec3::Z, 0.0)
    }

    /// Create a sphere whose texture is rotated `angle` degrees over `axis`.
    pub fn with_rotation(
        center: Vec3,
        radius: f32,
        material: Material,
        axis: Vec3,
        angle: f32,
    ) -> Self {
        Self {
            center,
            radius,
            material,
            axis,
            angle,
        }
    }
}

impl Object for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let (t0, t1) = solve_quadratic(a, b, c)?;

        // Nearest root in front of the origin. From inside the sphere the
        // near root is negative and the far one is taken instead.
        let t = if t0 >= 0.0 {
            t0
        } else if t1 >= 0.0 {
            t1
        } else {
            return None;
        };

        let normal = (ray.at(t) - self.center).normalize_or_zero();
        Some(Hit::new(t, normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }

    /// Spherical texture coordinates, after undoing the object rotation.
    fn to_uv(&self, point: Vec3) -> Option<(f32, f32)> {
        let angles = -self.angle.to_radians() * self.axis;
        let p = rotate_xyz(point - self.center, angles);

        let u = 0.5 + p.y.atan2(p.x) / (2.0 * PI);
        let v = 1.0 - (p.z / self.radius).clamp(-1.0, 1.0).acos() / PI;
        Some((u, v))
    }
}
