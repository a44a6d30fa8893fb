use winit::dpi::PhysicalSize;

/// Depth buffer that follows the surface size.
pub struct DepthTarget {
    format: wgpu::TextureFormat,
    size: PhysicalSize<u32>,
    view: Option<wgpu::TextureView>,
}

impl DepthTarget {
    pub const DEFAULT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    pub fn new(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            size: PhysicalSize::new(0, 0),
            view: None,
        }
    }

    /// Returns a view matching `size`, recreating the texture when the size changed.
    pub fn view(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) -> &wgpu::TextureView {
        let view = match self.view.take() {
            Some(view) if self.size == size => view,
            _ => self.create_view(device, size),
        };
        self.size = size;
        self.view.insert(view)
    }

    fn create_view(&self, device: &wgpu::Device, size: PhysicalSize<u32>) -> wgpu::TextureView {
        log::debug!("creating depth texture {}x{}", size.width, size.height);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Depth-stencil state for pipelines rendering into this target (`less`, writes on).
    pub fn stencil_state(&self) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: self.format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

impl Default for DepthTarget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FORMAT)
    }
}

/// Depth attachment clearing to 1.0 and storing.
pub(crate) fn depth_attachment(view: &wgpu::TextureView) -> wgpu::RenderPassDepthStencilAttachment<'_> {
    wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    }
}
