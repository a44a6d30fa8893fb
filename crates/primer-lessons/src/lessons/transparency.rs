use anyhow::Result;
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};

use super::support::{CLEAR_TRANSPARENT, PipelineDesc, shader_module};

/// A half-transparent triangle on a window cleared to transparent black.
///
/// The surface is composited with premultiplied alpha, so the fragment shader
/// writes premultiplied color and the desktop shows through.
#[derive(Default)]
pub struct Transparency {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl App for Transparency {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let module = shader_module(ctx.device, "translucent triangle", include_str!("../shaders/transparency.wgsl"));
        self.pipeline = Some(
            PipelineDesc::new("translucent triangle pipeline", &module, ctx.surface_format)
                .build(ctx.device),
        );
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = &self.pipeline else {
            return AppControl::Continue;
        };

        ctx.render("transparency frame", |_, target| {
            let mut pass = target.begin_pass("our basic canvas renderPass", CLEAR_TRANSPARENT, None, None);
            pass.set_pipeline(pipeline);
            pass.draw(0..3, 0..1);
        })
    }
}
