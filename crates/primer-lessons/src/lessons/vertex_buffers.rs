use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::geometry::{CircleOptions, ColoredVertex2, indexed_circle};
use primer_engine::math::Rng;
use primer_engine::render::gray;

use super::support::{PipelineDesc, empty_buffer, init_buffer, shader_module};

const NUM_OBJECTS: usize = 200;

/// Per-instance color and offset (12 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceStatics {
    color: [u8; 4],
    offset: [f32; 2],
}

impl InstanceStatics {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![1 => Unorm8x4, 2 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 4 => Unorm8x4];
const SCALE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32x2];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ColoredVertex2>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

fn scale_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &SCALE_ATTRS,
    }
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    static_buffer: wgpu::Buffer,
    scale_buffer: wgpu::Buffer,
    num_indices: u32,
}

/// The storage-buffer rings again, fed through vertex and index buffers.
pub struct VertexBuffers {
    rng: Rng,
    scales: Vec<f32>,
    res: Option<Resources>,
}

impl VertexBuffers {
    pub fn new(rng: Rng) -> Self {
        Self {
            rng,
            scales: Vec::new(),
            res: None,
        }
    }
}

fn unorm8_color(rng: &mut Rng) -> [u8; 4] {
    let [r, g, b, _] = rng.color();
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255]
}

impl App for VertexBuffers {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "vertex buffer shaders", include_str!("../shaders/vertex_buffers.wgsl"));
        let buffers = [vertex_layout(), InstanceStatics::layout(), scale_layout()];
        let pipeline = PipelineDesc::new("vertex buffer pipeline", &module, ctx.surface_format)
            .buffers(&buffers)
            .build(device);

        let rng = &mut self.rng;
        self.scales = (0..NUM_OBJECTS).map(|_| rng.range(0.1, 0.85)).collect();
        let statics: Vec<InstanceStatics> = (0..NUM_OBJECTS)
            .map(|_| InstanceStatics {
                color: unorm8_color(rng),
                offset: [rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)],
            })
            .collect();

        let circle = indexed_circle(&CircleOptions {
            radius: 0.25,
            inner_radius: 0.1,
            ..CircleOptions::default()
        });

        self.res = Some(Resources {
            vertex_buffer: init_buffer(
                device,
                "vertex buffer vertices",
                bytemuck::cast_slice(&circle.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: init_buffer(
                device,
                "index buffer",
                bytemuck::cast_slice(&circle.indices),
                wgpu::BufferUsages::INDEX,
            ),
            static_buffer: init_buffer(
                device,
                "static vertex for objects",
                bytemuck::cast_slice(&statics),
                wgpu::BufferUsages::VERTEX,
            ),
            scale_buffer: empty_buffer(
                device,
                "changing vertex for objects",
                (NUM_OBJECTS * size_of::<[f32; 2]>()) as wgpu::BufferAddress,
                wgpu::BufferUsages::VERTEX,
            ),
            num_indices: circle.indices.len() as u32,
            pipeline,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };
        let scales = &self.scales;

        ctx.render("vertex buffers frame", |rctx, target| {
            let aspect = rctx.aspect();
            let values: Vec<[f32; 2]> = scales.iter().map(|&s| [s / aspect, s]).collect();
            rctx.queue
                .write_buffer(&res.scale_buffer, 0, bytemuck::cast_slice(&values));

            let mut pass = target.begin_pass("vertex buffers pass", gray(0.8), None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, res.static_buffer.slice(..));
            pass.set_vertex_buffer(2, res.scale_buffer.slice(..));
            pass.set_index_buffer(res.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..res.num_indices, 0, 0..NUM_OBJECTS as u32);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_strides() {
        assert_eq!(vertex_layout().array_stride, 12);
        assert_eq!(InstanceStatics::layout().array_stride, 12);
        assert_eq!(scale_layout().array_stride, 8);
    }

    #[test]
    fn attribute_offsets_follow_packing() {
        let offsets: Vec<_> = VERTEX_ATTRS.iter().map(|a| (a.shader_location, a.offset)).collect();
        assert_eq!(offsets, vec![(0, 0), (4, 8)]);
        let offsets: Vec<_> = InstanceStatics::ATTRS
            .iter()
            .map(|a| (a.shader_location, a.offset))
            .collect();
        assert_eq!(offsets, vec![(1, 0), (2, 4)]);
    }

    #[test]
    fn colors_are_opaque() {
        let mut rng = Rng::new(7);
        for _ in 0..16 {
            assert_eq!(unorm8_color(&mut rng)[3], 255);
        }
    }
}
