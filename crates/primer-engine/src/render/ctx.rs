use winit::dpi::PhysicalSize;

use crate::coords::Viewport;

use super::depth::depth_attachment;

/// Handles a lesson records a frame with.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
    /// Window size in logical pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            size,
            viewport,
        }
    }

    /// Physical width over height.
    pub fn aspect(&self) -> f32 {
        Viewport::new(self.size.width as f32, self.size.height as f32).aspect()
    }
}

/// The frame's encoder and the swapchain view it draws into.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Begins a render pass that clears the surface view to `clear`.
    ///
    /// `depth` attaches a depth buffer cleared to 1.0; `timestamp_writes`
    /// brackets the pass with GPU timestamps.
    pub fn begin_pass(
        &mut self,
        label: &str,
        clear: wgpu::Color,
        depth: Option<&wgpu::TextureView>,
        timestamp_writes: Option<wgpu::RenderPassTimestampWrites<'_>>,
    ) -> wgpu::RenderPass<'_> {
        let view = self.color_view;
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: depth.map(depth_attachment),
            timestamp_writes,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Uniform gray clear color, the way most lessons clear their canvas.
pub fn gray(v: f64) -> wgpu::Color {
    wgpu::Color {
        r: v,
        g: v,
        b: v,
        a: 1.0,
    }
}
