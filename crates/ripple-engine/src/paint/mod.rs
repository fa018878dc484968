//! Color model shared between the scene, the shading unit and the overlay.

mod color;

pub use color::{srgb_to_linear, Color};
