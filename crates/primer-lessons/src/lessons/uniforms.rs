use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::math::Rng;
use primer_engine::render::gray;

use super::support::{PipelineDesc, buffer_bind_group, empty_buffer, init_buffer, shader_module};

const NUM_OBJECTS: usize = 100;

/// `OurStruct`: written once.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct StaticUniforms {
    color: [f32; 4],
    offset: [f32; 2],
    _pad: [f32; 2],
}

/// `OtherStruct`: rewritten every frame to follow the aspect ratio.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScaleUniform {
    scale: [f32; 2],
}

struct Object {
    scale: f32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    objects: Vec<Object>,
}

/// A hundred triangles, each with its own pair of uniform buffers.
pub struct Uniforms {
    rng: Rng,
    res: Option<Resources>,
}

impl Uniforms {
    pub fn new(rng: Rng) -> Self {
        Self { rng, res: None }
    }
}

impl App for Uniforms {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "triangle shaders with uniforms", include_str!("../shaders/uniforms.wgsl"));
        let pipeline = PipelineDesc::new("triangle with uniforms", &module, ctx.surface_format).build(device);
        let layout = pipeline.get_bind_group_layout(0);

        let rng = &mut self.rng;
        let objects = (0..NUM_OBJECTS)
            .map(|i| {
                let statics = StaticUniforms {
                    color: rng.color(),
                    offset: [rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)],
                    _pad: [0.0; 2],
                };
                let static_buffer = init_buffer(
                    device,
                    &format!("static uniforms for obj: {i}"),
                    bytemuck::bytes_of(&statics),
                    wgpu::BufferUsages::UNIFORM,
                );
                let uniform_buffer = empty_buffer(
                    device,
                    &format!("changing uniforms for obj: {i}"),
                    size_of::<ScaleUniform>() as wgpu::BufferAddress,
                    wgpu::BufferUsages::UNIFORM,
                );
                let bind_group = buffer_bind_group(
                    device,
                    &format!("bind group for obj: {i}"),
                    &layout,
                    &[&static_buffer, &uniform_buffer],
                );
                Object {
                    scale: rng.range(0.1, 0.6),
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        self.res = Some(Resources { pipeline, objects });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        ctx.render("uniforms frame", |rctx, target| {
            let aspect = rctx.aspect();
            let mut pass = target.begin_pass("our basic canvas renderPass", gray(0.8), None, None);
            pass.set_pipeline(&res.pipeline);

            for obj in &res.objects {
                let uniform = ScaleUniform {
                    scale: [obj.scale / aspect, obj.scale],
                };
                rctx.queue
                    .write_buffer(&obj.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
                pass.set_bind_group(0, &obj.bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<StaticUniforms>(), 32);
        assert_eq!(size_of::<ScaleUniform>(), 8);
    }
}
