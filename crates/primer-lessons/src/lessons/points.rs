use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::math::Rng;
use primer_engine::render::gray;

use super::support::{PipelineDesc, buffer_bind_group, empty_buffer, init_buffer, shader_module};

const NUM_POINTS: u32 = 1000;

/// Clip-space center plus edge length in pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Point {
    position: [f32; 2],
    size: f32,
}

impl Point {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn random(rng: &mut Rng) -> Self {
        Self {
            position: [rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)],
            size: rng.range(2.0, 10.0),
        }
    }
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Points drawn as instanced quads whose size stays constant in pixels.
pub struct Points {
    rng: Rng,
    res: Option<Resources>,
}

impl Points {
    pub fn new(rng: Rng) -> Self {
        Self { rng, res: None }
    }
}

impl App for Points {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "sized points shader", include_str!("../shaders/points.wgsl"));
        let pipeline = PipelineDesc::new("sized points pipeline", &module, ctx.surface_format)
            .buffers(&[Point::layout()])
            .build(device);

        let rng = &mut self.rng;
        let points: Vec<Point> = (0..NUM_POINTS).map(|_| Point::random(rng)).collect();
        let vertex_buffer = init_buffer(
            device,
            "points vertex buffer",
            bytemuck::cast_slice(&points),
            wgpu::BufferUsages::VERTEX,
        );
        let uniform_buffer = empty_buffer(
            device,
            "resolution uniform",
            size_of::<[f32; 2]>() as wgpu::BufferAddress,
            wgpu::BufferUsages::UNIFORM,
        );
        let bind_group = buffer_bind_group(
            device,
            "resolution bind group",
            &pipeline.get_bind_group_layout(0),
            &[&uniform_buffer],
        );

        self.res = Some(Resources {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        ctx.render("points frame", |rctx, target| {
            let resolution = [rctx.size.width as f32, rctx.size.height as f32];
            rctx.queue
                .write_buffer(&res.uniform_buffer, 0, bytemuck::cast_slice(&resolution));

            let mut pass = target.begin_pass("sized points pass", gray(0.1), None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
            pass.draw(0..6, 0..NUM_POINTS);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_stride_is_three_floats() {
        assert_eq!(Point::layout().array_stride, 12);
        assert_eq!(Point::ATTRS[1].offset, 8);
    }

    #[test]
    fn random_points_stay_in_range() {
        let mut rng = Rng::new(3);
        for _ in 0..100 {
            let p = Point::random(&mut rng);
            assert!(p.position.iter().all(|c| (-1.0..1.0).contains(c)));
            assert!((2.0..10.0).contains(&p.size));
        }
    }
}
