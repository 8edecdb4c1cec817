// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod ray;
mod rotate;
mod solvers;

pub use ray::Ray;
pub use rotate::rotate_xyz;
pub use solvers::solve_quadratic;
