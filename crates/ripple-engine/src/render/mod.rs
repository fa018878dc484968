//! GPU rendering subsystem.
//!
//! Renderers consume scene data or overlay draw streams and issue GPU
//! commands via wgpu. Each renderer owns its GPU resources (pipelines,
//! buffers, depth targets) and creates them lazily for the current surface.
//!
//! Convention for overlay geometry:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod common;
mod ctx;
mod plane;
mod rect;
mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use plane::{PlaneRenderer, DEPTH_FORMAT};
pub use rect::RectRenderer;
pub use text::TextRenderer;

#[cfg(test)]
mod tests {
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    fn assert_valid(src: &str) {
        let module = naga::front::wgsl::parse_str(src)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(src)));
        Validator::new(ValidationFlags::all(), Capabilities::default())
            .validate(&module)
            .unwrap_or_else(|e| panic!("{e:?}"));
        for entry in ["vs_main", "fs_main"] {
            assert!(module.entry_points.iter().any(|ep| ep.name == entry), "missing {entry}");
        }
    }

    #[test]
    fn overlay_shaders_validate() {
        assert_valid(include_str!("shaders/rect.wgsl"));
        assert_valid(include_str!("shaders/text.wgsl"));
    }
}
