use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::math::{Rng, Vec2};

use super::support::{
    CLEAR_TRANSPARENT, IndexedMesh, PipelineDesc, arrow_axes, buffer_bind_group, empty_buffer,
    position_2d_layout, shader_module,
};

/// Pixels per second while an arrow key is held.
const SPEED: f32 = 200.0;
const MAX_TRANSLATION: f32 = 500.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    color: [f32; 4],
    resolution: [f32; 2],
    translation: [f32; 2],
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    mesh: IndexedMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// The 2D "F" moved around in pixel coordinates with the arrow keys.
pub struct Translation {
    color: [f32; 4],
    translation: Vec2,
    res: Option<Resources>,
}

impl Translation {
    pub fn new(mut rng: Rng) -> Self {
        Self {
            color: rng.color(),
            translation: Vec2::ZERO,
            res: None,
        }
    }
}

/// Moves `translation` along `direction`, keeping it in `[0, MAX_TRANSLATION]`.
fn translate(translation: Vec2, direction: Vec2, dt: f32) -> Vec2 {
    (translation + direction * SPEED * dt).clamp(Vec2::ZERO, Vec2::splat(MAX_TRANSLATION))
}

impl App for Translation {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "translation shaders", include_str!("../shaders/translation.wgsl"));
        let pipeline = PipelineDesc::new("translation pipeline", &module, ctx.surface_format)
            .buffers(&[position_2d_layout()])
            .build(device);

        let uniform_buffer = empty_buffer(
            device,
            "translation uniforms",
            size_of::<Uniforms>() as wgpu::BufferAddress,
            wgpu::BufferUsages::UNIFORM,
        );
        let bind_group = buffer_bind_group(
            device,
            "bind group for uniforms",
            &pipeline.get_bind_group_layout(0),
            &[&uniform_buffer],
        );

        self.res = Some(Resources {
            pipeline,
            mesh: IndexedMesh::f_2d(device),
            uniform_buffer,
            bind_group,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        self.translation = translate(self.translation, arrow_axes(ctx.input), ctx.time.dt);
        let viewport = ctx.window.viewport();
        let uniforms = Uniforms {
            color: self.color,
            resolution: [viewport.width, viewport.height],
            translation: self.translation.to_array(),
        };

        ctx.render("translation frame", |rctx, target| {
            rctx.queue
                .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

            let mut pass = target.begin_pass("translation pass", CLEAR_TRANSPARENT, None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            res.mesh.draw(&mut pass, 1);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_32_bytes() {
        assert_eq!(size_of::<Uniforms>(), 32);
    }

    #[test]
    fn translation_is_clamped() {
        let moved = translate(Vec2::new(10.0, 490.0), Vec2::new(-1.0, 1.0), 1.0);
        assert_eq!(moved, Vec2::new(0.0, MAX_TRANSLATION));

        let moved = translate(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 0.5);
        assert_eq!(moved, Vec2::new(200.0, 100.0));
    }
}
