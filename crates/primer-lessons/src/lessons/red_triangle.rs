use anyhow::Result;
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::render::gray;

use super::support::{PipelineDesc, shader_module};

/// Hard-coded triangle positions in the vertex shader, a constant red fragment.
#[derive(Default)]
pub struct RedTriangle {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl App for RedTriangle {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let module = shader_module(
            ctx.device,
            "hardcoded red triangle shaders",
            include_str!("../shaders/red_triangle.wgsl"),
        );
        self.pipeline = Some(
            PipelineDesc::new("hardcoded red triangle pipeline", &module, ctx.surface_format)
                .build(ctx.device),
        );
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = &self.pipeline else {
            return AppControl::Continue;
        };

        ctx.render("red triangle frame", |_, target| {
            let mut pass = target.begin_pass("our basic canvas renderPass", gray(0.3), None, None);
            pass.set_pipeline(pipeline);
            pass.draw(0..3, 0..1);
        })
    }
}
