//! Point lights.

use glam::Vec3;

use crate::material::Color;

/// A point light: a position in space and the color it emits.
///
/// The color doubles as intensity; channels above 1.0 are legal and simply
/// push surfaces toward clamping at the final pixel write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}
