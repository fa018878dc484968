use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::PlaneUniforms;

/// Interleaved plane vertex: `position` at location 0, `a_random` at location 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub a_random: f32,
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32    // a_random
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Uniform buffer contents, laid out to match `struct PlaneUniforms` in WGSL.
///
/// Matrices are column-major. `_pad` keeps `color` on a 16-byte boundary.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PlaneUniformBlock {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub frequency: [f32; 2],
    pub time: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl PlaneUniformBlock {
    pub fn new(uniforms: &PlaneUniforms, model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            frequency: uniforms.frequency.to_array(),
            time: uniforms.time,
            _pad: 0.0,
            color: uniforms.color.to_array(),
        }
    }

    /// Binding size for the bind group layout. Non-zero by construction.
    pub fn min_binding_size() -> Option<std::num::NonZeroU64> {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(offset_of!(PlaneUniformBlock, view), 64);
        assert_eq!(offset_of!(PlaneUniformBlock, projection), 128);
        assert_eq!(offset_of!(PlaneUniformBlock, frequency), 192);
        assert_eq!(offset_of!(PlaneUniformBlock, time), 200);
        assert_eq!(offset_of!(PlaneUniformBlock, color), 208);
        assert_eq!(size_of::<PlaneUniformBlock>(), 224);
        assert_eq!(size_of::<PlaneUniformBlock>() % 16, 0);
    }

    #[test]
    fn vertex_stride_is_sixteen_bytes() {
        assert_eq!(size_of::<PlaneVertex>(), 16);
        assert_eq!(PlaneVertex::layout().array_stride, 16);
    }

    #[test]
    fn block_carries_uniform_values() {
        let u = PlaneUniforms {
            time: 2.5,
            ..PlaneUniforms::default()
        };
        let block = PlaneUniformBlock::new(&u, Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(block.time, 2.5);
        assert_eq!(block.frequency, [10.0, 5.0]);
        assert_eq!(block.color, u.color.to_array());
        assert_eq!(block.model, Mat4::IDENTITY.to_cols_array_2d());
    }
}
