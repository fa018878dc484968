//! Ripple engine crate.
//!
//! Platform + GPU runtime pieces for the ripple demo: window loop, input,
//! frame timing, a small 3D scene model, the displacement shading unit, its
//! renderers, overlay text, and the debug parameter panel.

pub mod core;
pub mod coords;
pub mod device;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod panel;
pub mod render;
pub mod scene;
pub mod shading;
pub mod text;
pub mod time;
pub mod window;
