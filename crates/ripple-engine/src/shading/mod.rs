//! Displacement shading unit.
//!
//! The plane's vertex/pixel programs live as WGSL text assets next to this
//! module. `displacement` is the CPU reference of the same math and `layout`
//! holds the attribute/uniform contract shared with the GPU.

mod displacement;
mod layout;

pub use displacement::{
    displace, elevation, pixel_stage, vertex_stage, PlaneUniforms, RANDOM_AMPLITUDE,
    WAVE_AMPLITUDE,
};
pub use layout::{PlaneUniformBlock, PlaneVertex};

/// Vertex program source (entry point `vs_main`).
pub const VERTEX_SHADER: &str = include_str!("shaders/plane_vertex.wgsl");

/// Pixel program source (entry point `fs_main`).
pub const FRAGMENT_SHADER: &str = include_str!("shaders/plane_fragment.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";
