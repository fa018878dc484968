//! Time subsystem.
//!
//! - one `FrameClock` per window; call `tick()` once per presented frame
//! - `Tween` interpolates a scalar over wall-clock time (elapsed seconds)

mod frame_clock;
mod tween;

pub use frame_clock::{FrameClock, FrameTime};
pub use tween::{Ease, Tween};
