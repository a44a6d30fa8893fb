use std::sync::mpsc;

use anyhow::{Context, Result};

use super::{GpuInit, adapter};

/// Adapter, device and queue without a surface.
///
/// Compute lessons never open a window; they dispatch work, copy the results
/// into a mappable buffer and read them back on the CPU.
pub struct HeadlessGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Acquires an adapter and device with no compatible surface.
    pub async fn new(label: &str, init: GpuInit) -> Result<Self> {
        let instance = adapter::create_instance();
        let (_, device, queue) = adapter::open_device(&instance, None, label, &init).await?;

        Ok(Self {
            device,
            queue,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Maps `buffer` for reading, waits for the GPU, and copies its contents out.
    ///
    /// The buffer must have been created with `MAP_READ` and every submission
    /// writing to it must already be queued. It is unmapped before returning.
    pub fn read_buffer(&self, buffer: &wgpu::Buffer) -> Result<Vec<u8>> {
        let slice = buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            // The receiver outlives the poll below; a failed send means nobody is waiting.
            let _ = sender.send(result);
        });

        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed to wait for the GPU")?;

        receiver
            .recv()
            .context("buffer mapping callback never ran")?
            .context("failed to map buffer for reading")?;

        let bytes = slice.get_mapped_range().to_vec();
        buffer.unmap();
        Ok(bytes)
    }
}
