//! Adapter, device and surface setup.
//!
//! [`Gpu`] drives a window's swapchain; [`HeadlessGpu`] serves the compute
//! lessons that only read results back. Both request their device through the
//! same [`GpuInit`] options.

mod adapter;
mod frame;
mod gpu;
mod headless;
mod init;
mod surface;

pub use frame::{SurfaceErrorAction, SurfaceFrame};
pub use gpu::Gpu;
pub use headless::HeadlessGpu;
pub use init::GpuInit;
pub use surface::surface_extent;
