use crate::shading::PlaneUniforms;

use super::{PlaneGeometry, Transform};

/// Raw shader material: the plane programs plus their uniform values.
#[derive(Debug, Clone, Default)]
pub struct ShaderMaterial {
    pub uniforms: PlaneUniforms,
    /// Draw triangle edges as lines instead of filled triangles.
    pub wireframe: bool,
}

/// Geometry + material + transform, drawn by `render::PlaneRenderer`.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: ShaderMaterial,
    pub transform: Transform,
    pub visible: bool,
}

impl Mesh {
    pub fn new(geometry: PlaneGeometry, material: ShaderMaterial) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }
}
