//! Rendering helpers shared by the lessons.
//!
//! Each lesson owns its pipelines and buffers; this module only provides the
//! per-frame context, the surface target and a size-tracking depth buffer.

mod ctx;
mod depth;

pub use ctx::{gray, RenderCtx, RenderTarget};
pub use depth::DepthTarget;
