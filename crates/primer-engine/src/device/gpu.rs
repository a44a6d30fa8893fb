use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::{GpuInit, SurfaceErrorAction, SurfaceFrame, adapter, surface};

/// A device presenting into one window.
///
/// The surface is reconfigured whenever the window's drawable size changes;
/// lessons read that size back through [`Gpu::size`] to size their own
/// render targets.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // May be 0x0 while minimized; `config` keeps the last usable extent.
    size: PhysicalSize<u32>,
    max_pixel_ratio: f64,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let inner = window.inner_size();
        anyhow::ensure!(inner.width > 0 && inner.height > 0, "window has zero size");

        let instance = adapter::create_instance();
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;
        let (adapter, device, queue) =
            adapter::open_device(&instance, Some(&surface), "primer device", &init).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);
        let size = drawable_size(
            window,
            init.max_pixel_ratio,
            device.limits().max_texture_dimension_2d,
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);
        log::debug!(
            "surface configured: {format:?} {}x{} alpha {alpha_mode:?}",
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            max_pixel_ratio: init.max_pixel_ratio,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Follows the window's current size and scale factor.
    pub fn resize_to_window(&mut self, window: &Window) {
        let inner = window.inner_size();
        if inner.width == 0 || inner.height == 0 {
            self.size = inner;
            return;
        }
        let target = drawable_size(window, self.max_pixel_ratio, self.max_texture_dimension());
        self.resize(target);
    }

    /// Sets the drawable size, clamped to the texture limit.
    ///
    /// A zero extent is recorded but the surface is left configured at its
    /// previous size until a usable one arrives.
    pub fn resize(&mut self, requested: PhysicalSize<u32>) {
        let max = self.max_texture_dimension();
        let clamped = PhysicalSize::new(requested.width.min(max), requested.height.min(max));
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            clamped,
        );
    }

    pub fn begin_frame(&self, label: &str) -> std::result::Result<SurfaceFrame, SurfaceError> {
        let texture = self.surface.get_current_texture()?;
        let view = texture.texture.create_view(&Default::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
        Ok(SurfaceFrame {
            texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents its texture.
    pub fn submit(&self, frame: SurfaceFrame) {
        let SurfaceFrame {
            texture,
            view,
            encoder,
        } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        log::warn!("surface error: {err}");
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}

fn drawable_size(window: &Window, max_pixel_ratio: f64, max_dimension: u32) -> PhysicalSize<u32> {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f64>(scale);
    surface::surface_extent(
        (logical.width, logical.height),
        scale,
        max_pixel_ratio,
        max_dimension,
    )
}
