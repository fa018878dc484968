//! Coordinate and geometry types for the 2D overlay and window sizing.
//!
//! Canonical overlay space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! 3D scene math uses `glam` directly; see `scene`.

mod rect;
mod sizes;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use sizes::{capped_pixel_ratio, Sizes, MAX_PIXEL_RATIO};
pub use vec2::Vec2;
pub use viewport::Viewport;
