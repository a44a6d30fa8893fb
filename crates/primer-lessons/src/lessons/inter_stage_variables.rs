use anyhow::Result;
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::render::gray;

use super::support::{PipelineDesc, shader_module};

/// A triangle whose corner colors are interpolated across its face.
#[derive(Default)]
pub struct InterStageVariables {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl App for InterStageVariables {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let module = shader_module(
            ctx.device,
            "hardcoded rgb triangle shaders",
            include_str!("../shaders/inter_stage_variables.wgsl"),
        );
        self.pipeline = Some(
            PipelineDesc::new("hardcoded rgb triangle pipeline", &module, ctx.surface_format)
                .build(ctx.device),
        );
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = &self.pipeline else {
            return AppControl::Continue;
        };

        ctx.render("inter-stage frame", |_, target| {
            let mut pass = target.begin_pass("rgb triangle pass", gray(0.8), None, None);
            pass.set_pipeline(pipeline);
            pass.draw(0..3, 0..1);
        })
    }
}
