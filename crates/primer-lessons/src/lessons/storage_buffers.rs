use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::geometry::{CircleOptions, circle_vertices};
use primer_engine::math::Rng;
use primer_engine::render::gray;

use super::support::{PipelineDesc, buffer_bind_group, empty_buffer, init_buffer, shader_module};

const NUM_OBJECTS: usize = 200;

/// One element of the static storage array.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectStatics {
    color: [f32; 4],
    offset: [f32; 2],
    _pad: [f32; 2],
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    scale_buffer: wgpu::Buffer,
    num_vertices: u32,
}

/// Two hundred instanced rings; every per-object value lives in storage
/// buffers indexed by `instance_index`, and so do the vertices.
pub struct StorageBuffers {
    rng: Rng,
    scales: Vec<f32>,
    res: Option<Resources>,
}

impl StorageBuffers {
    pub fn new(rng: Rng) -> Self {
        Self {
            rng,
            scales: Vec::new(),
            res: None,
        }
    }
}

/// `(scale / aspect, scale)` per object, ready for the dynamic storage buffer.
fn scale_values(scales: &[f32], aspect: f32) -> Vec<[f32; 2]> {
    scales.iter().map(|&s| [s / aspect, s]).collect()
}

impl App for StorageBuffers {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "storage buffer shaders", include_str!("../shaders/storage_buffers.wgsl"));
        let pipeline = PipelineDesc::new("storage buffer pipeline", &module, ctx.surface_format).build(device);

        let rng = &mut self.rng;
        self.scales = (0..NUM_OBJECTS).map(|_| rng.range(0.1, 0.85)).collect();
        let statics: Vec<ObjectStatics> = (0..NUM_OBJECTS)
            .map(|_| ObjectStatics {
                color: rng.color(),
                offset: [rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)],
                _pad: [0.0; 2],
            })
            .collect();

        let static_buffer = init_buffer(
            device,
            "static storage for objects",
            bytemuck::cast_slice(&statics),
            wgpu::BufferUsages::STORAGE,
        );
        let scale_buffer = empty_buffer(
            device,
            "changing storage for objects",
            (NUM_OBJECTS * size_of::<[f32; 2]>()) as wgpu::BufferAddress,
            wgpu::BufferUsages::STORAGE,
        );

        let vertices = circle_vertices(&CircleOptions {
            radius: 0.25,
            inner_radius: 0.1,
            ..CircleOptions::default()
        });
        let vertex_buffer = init_buffer(
            device,
            "storage buffer vertices",
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::STORAGE,
        );

        let bind_group = buffer_bind_group(
            device,
            "bind group for objects",
            &pipeline.get_bind_group_layout(0),
            &[&static_buffer, &scale_buffer, &vertex_buffer],
        );

        self.res = Some(Resources {
            pipeline,
            bind_group,
            scale_buffer,
            num_vertices: vertices.len() as u32,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };
        let scales = &self.scales;

        ctx.render("storage buffers frame", |rctx, target| {
            let values = scale_values(scales, rctx.aspect());
            rctx.queue
                .write_buffer(&res.scale_buffer, 0, bytemuck::cast_slice(&values));

            let mut pass = target.begin_pass("storage buffers pass", gray(0.8), None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.draw(0..res.num_vertices, 0..NUM_OBJECTS as u32);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statics_match_storage_stride() {
        assert_eq!(size_of::<ObjectStatics>(), 32);
    }

    #[test]
    fn scales_are_divided_by_aspect_on_x() {
        let values = scale_values(&[0.5, 0.2], 2.0);
        assert_eq!(values, vec![[0.25, 0.5], [0.1, 0.2]]);
    }
}
