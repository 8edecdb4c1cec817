//! The `Object` trait shared by all renderable primitives.

use glam::Vec3;
use prism_core::Material;
use prism_math::Ray;

/// Result of a successful ray/object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray to the intersection point.
    pub t: f32,
    /// Surface normal at the hit point. Not guaranteed to face the ray
    /// origin; shading re-orients it against the view direction.
    pub normal: Vec3,
}

impl Hit {
    pub fn new(t: f32, normal: Vec3) -> Self {
        Self { t, normal }
    }
}

/// Anything a ray can hit.
///
/// Implementors must be `Send + Sync` so scenes can be rendered across
/// threads.
pub trait Object: Send + Sync {
    /// Test the ray against this object.
    ///
    /// Returns the nearest intersection with t >= 0, or `None` when the
    /// ray misses or the object lies behind the ray origin.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// The material covering this object's surface.
    fn material(&self) -> &Material;

    /// Map a point on the surface to texture coordinates in [0, 1]^2,
    /// with v growing from the south pole upward.
    ///
    /// Objects without a parameterization return `None` (the default)
    /// and shade with their flat material color.
    fn to_uv(&self, _point: Vec3) -> Option<(f32, f32)> {
        None
    }
}
