//! 3D scene types: geometry, material, mesh, camera and camera controls.
//!
//! Conventions (three.js-compatible):
//! - right-handed, +Y up, camera looks down −Z by default
//! - Euler rotations are XYZ order, in radians
//! - projection maps depth to 0..1 (wgpu)

mod camera;
mod controls;
mod geometry;
mod mesh;
mod transform;

pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use geometry::PlaneGeometry;
pub use mesh::{Mesh, ShaderMaterial};
pub use transform::Transform;
