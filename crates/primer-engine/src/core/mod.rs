//! The lesson-facing side of the runtime.
//!
//! A windowed lesson implements [`App`]; the runtime calls it with an
//! [`InitCtx`] once and a [`FrameCtx`] every redraw.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
