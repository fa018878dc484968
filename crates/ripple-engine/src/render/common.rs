//! GPU types and helpers shared by the overlay renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn min_binding_size() -> Option<std::num::NonZeroU64> {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Converts a logical-pixel clip rect to a physical scissor rect.
///
/// `clip = None` means "no scissor" and yields the full viewport.
/// Returns `None` for a zero-area result; the caller skips the draw.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(phys_vw);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

/// Splits instances into consecutive runs that share a clip rect.
pub(super) fn clip_runs<T>(
    instances: &[(T, Option<Rect>)],
) -> Vec<(std::ops::Range<u32>, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut i = 0usize;
    while i < instances.len() {
        let clip = instances[i].1;
        let mut j = i + 1;
        while j < instances.len() && instances[j].1 == clip {
            j += 1;
        }
        runs.push((i as u32..j as u32, clip));
        i = j;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_the_scaled_viewport() {
        let s = logical_clip_to_scissor(None, Viewport::new(400.0, 300.0), 2.0);
        assert_eq!(s, Some((0, 0, 800, 600)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let clip = Rect::new(350.0, 10.0, 100.0, 20.0);
        let s = logical_clip_to_scissor(Some(clip), Viewport::new(400.0, 300.0), 2.0);
        assert_eq!(s, Some((700, 20, 100, 40)));
    }

    #[test]
    fn clip_outside_the_viewport_is_skipped() {
        let clip = Rect::new(500.0, 10.0, 100.0, 20.0);
        assert_eq!(logical_clip_to_scissor(Some(clip), Viewport::new(400.0, 300.0), 1.0), None);
    }

    #[test]
    fn viewport_uniform_is_sixteen_bytes() {
        assert_eq!(ViewportUniform::min_binding_size().map(|n| n.get()), Some(16));
    }
}
