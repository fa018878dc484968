//! 2D overlay draw stream.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in logical pixels
//! - provide deterministic ordering (z-index + insertion order)
//! - scope commands to scissor rects

mod key;
mod list;

pub use key::{SortKey, ZIndex};
pub use list::{DrawCmd, DrawItem, DrawList, RectCmd, TextCmd};
