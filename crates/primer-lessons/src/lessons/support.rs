//! Pipeline and buffer boilerplate shared by the windowed lessons.

use primer_engine::geometry::{ColoredVertex3, f_2d};
use primer_engine::input::{InputState, Key};
use primer_engine::math::Vec2;
use wgpu::util::DeviceExt;

/// Fixed-function choices for a single-module render pipeline.
///
/// The module must hold exactly one vertex and one fragment entry point; the
/// bind group layout is derived from the shader.
pub(crate) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub module: &'a wgpu::ShaderModule,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub format: wgpu::TextureFormat,
    pub cull_mode: Option<wgpu::Face>,
    pub depth_stencil: Option<wgpu::DepthStencilState>,
}

impl<'a> PipelineDesc<'a> {
    pub fn new(label: &'a str, module: &'a wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        Self {
            label,
            module,
            buffers: &[],
            format,
            cull_mode: None,
            depth_stencil: None,
        }
    }

    pub fn buffers(mut self, buffers: &'a [wgpu::VertexBufferLayout<'a>]) -> Self {
        self.buffers = buffers;
        self
    }

    pub fn cull(mut self, face: wgpu::Face) -> Self {
        self.cull_mode = Some(face);
        self
    }

    pub fn depth(mut self, state: wgpu::DepthStencilState) -> Self {
        self.depth_stencil = Some(state);
        self
    }

    pub fn build(self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: None,

            vertex: wgpu::VertexState {
                module: self.module,
                entry_point: None,
                compilation_options: Default::default(),
                buffers: self.buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: self.module,
                entry_point: None,
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: self.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: self.depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

pub(crate) fn shader_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Zeroed buffer written later with `Queue::write_buffer`.
pub(crate) fn empty_buffer(
    device: &wgpu::Device,
    label: &str,
    size: wgpu::BufferAddress,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Buffer initialized with `contents`.
pub(crate) fn init_buffer(
    device: &wgpu::Device,
    label: &str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: usage | wgpu::BufferUsages::COPY_DST,
    })
}

/// Bind group over whole buffers at consecutive bindings from 0.
pub(crate) fn buffer_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffers: &[&wgpu::Buffer],
) -> wgpu::BindGroup {
    let entries: Vec<_> = buffers
        .iter()
        .enumerate()
        .map(|(binding, buffer)| wgpu::BindGroupEntry {
            binding: binding as u32,
            resource: buffer.as_entire_binding(),
        })
        .collect();

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}

/// Transparent black, for lessons that composite with the desktop.
pub(crate) const CLEAR_TRANSPARENT: wgpu::Color = wgpu::Color::TRANSPARENT;

/// Vertex and index buffers for one indexed draw.
pub(crate) struct IndexedMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl IndexedMesh {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[u8], indices: &[u32]) -> Self {
        Self {
            vertex_buffer: init_buffer(device, label, vertices, wgpu::BufferUsages::VERTEX),
            index_buffer: init_buffer(
                device,
                label,
                bytemuck::cast_slice(indices),
                wgpu::BufferUsages::INDEX,
            ),
            num_indices: indices.len() as u32,
        }
    }

    /// The 2D "F" in pixel units.
    pub fn f_2d(device: &wgpu::Device) -> Self {
        let f = f_2d();
        Self::new(device, "F vertices", bytemuck::cast_slice(&f.vertices), &f.indices)
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, instances: u32) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.num_indices, 0, 0..instances);
    }
}

const POSITION_2D_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// A bare `float32x2` position at location 0.
pub(crate) fn position_2d_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_2D_ATTRS,
    }
}

const COLORED_3D_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Unorm8x4];

/// `ColoredVertex3`: `float32x3` position at 0, `unorm8x4` color at 1.
pub(crate) fn colored_3d_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ColoredVertex3>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLORED_3D_ATTRS,
    }
}

/// Arrow-key direction in pixel space (+x right, +y down).
pub(crate) fn arrow_axes(input: &InputState) -> Vec2 {
    Vec2::new(
        input.axis(Key::ArrowLeft, Key::ArrowRight),
        input.axis(Key::ArrowUp, Key::ArrowDown),
    )
}

/// Reinterprets mapped bytes as `T`s; the mapping carries no alignment guarantee.
pub(crate) fn read_pods<T: bytemuck::Pod>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(std::mem::size_of::<T>())
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_pods_ignores_trailing_bytes() {
        let bytes = [1u8, 0, 0, 0, 2, 0, 0, 0, 9];
        assert_eq!(read_pods::<u32>(&bytes), vec![1, 2]);
    }

    #[test]
    fn vertex_layout_strides() {
        assert_eq!(position_2d_layout().array_stride, 8);
        let layout = colored_3d_layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn arrows_map_to_pixel_directions() {
        let mut input = InputState::default();
        input.held_keys.insert(Key::ArrowLeft);
        input.held_keys.insert(Key::ArrowDown);
        assert_eq!(arrow_axes(&input), Vec2::new(-1.0, 1.0));
    }
}
