use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Whether the runtime keeps going after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A windowed lesson.
pub trait App {
    /// Creates pipelines, buffers and bind groups once the device exists.
    ///
    /// An error closes the window and comes back out of `Runtime::run`.
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()>;

    /// Sees every window event after the input state has absorbed it.
    fn on_window_event(&mut self, _event: &WindowEvent) -> AppControl {
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
