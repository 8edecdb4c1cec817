use crate::{Mat3, Vec3};

/// Rotate `v` about the x axis, then y, then z, by `angles` (radians).
///
/// The rotations are applied one after another as three matrix products,
/// not fused into a single matrix, so the result is the specific
/// non-commutative composition rot_z(rot_y(rot_x(v))). Mesh baking and
/// sphere texture orientation both rely on this exact order.
pub fn rotate_xyz(v: Vec3, angles: Vec3) -> Vec3 {
    let v = Mat3::from_rotation_x(angles.x) * v;
    let v = Mat3::from_rotation_y(angles.y) * v;
    Mat3::from_rotation_z(angles.z) * v
}
