//! Shared plumbing for the WebGPU lessons.
//!
//! [`window::Runtime`] opens a window and drives a [`core::App`];
//! [`device::HeadlessGpu`] covers the compute lessons that never present.
//! The remaining modules are CPU-side helpers whose output ends up in buffers
//! and textures.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub mod coords;
pub mod render;

pub mod geometry;
pub mod math;
pub mod profile;
pub mod shader;
pub mod texture;
