use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::coords::Sizes;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called when a window is created and whenever its logical size or
    /// pixel ratio changes. The surface is already reconfigured.
    fn on_resize(&mut self, window_id: WindowId, sizes: Sizes) {
        let _ = (window_id, sizes);
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
