use std::path::PathBuf;

use anyhow::{Context, Result};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::render::gray;
use primer_engine::texture::{MipLevel, create_texture_with_mips, f_texture, load_image};

use super::support::{PipelineDesc, shader_module};

/// Reverses row order so row 0 is the bottom of the image.
fn flip_rows(level: &MipLevel) -> MipLevel {
    let row = level.width as usize * 4;
    if row == 0 {
        return level.clone();
    }
    let data = level.data.chunks_exact(row).rev().flatten().copied().collect();
    MipLevel::new(data, level.width, level.height)
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// An image file sampled onto the upper-right quarter of the window.
///
/// Without `--image`, a generated "F" stands in for the file.
pub struct LoadingImages {
    image: Option<PathBuf>,
    res: Option<Resources>,
}

impl LoadingImages {
    pub fn new(image: Option<PathBuf>) -> Self {
        Self { image, res: None }
    }

    fn source(&self) -> Result<MipLevel> {
        match &self.image {
            Some(path) => load_image(path, true)
                .with_context(|| format!("failed to load {}", path.display())),
            None => {
                log::info!("no --image given, using the generated F texture");
                Ok(flip_rows(&f_texture()))
            }
        }
    }
}

impl App for LoadingImages {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "image quad module", include_str!("../shaders/loading_images.wgsl"));
        let pipeline = PipelineDesc::new("image quad pipeline", &module, ctx.surface_format).build(device);

        let source = self.source()?;
        log::debug!("image is {}x{}", source.width, source.height);
        let texture = create_texture_with_mips(device, ctx.queue, std::slice::from_ref(&source), "loaded image")?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image bind group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });

        self.res = Some(Resources { pipeline, bind_group });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        ctx.render("loading images frame", |_, target| {
            let mut pass = target.begin_pass("image quad pass", gray(0.9), None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.draw(0..6, 0..1);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_reverses_rows() {
        let level = MipLevel::new((0..16).collect(), 2, 2);
        let flipped = flip_rows(&level);
        assert_eq!(flipped.data[..8], level.data[8..]);
        assert_eq!(flipped.data[8..], level.data[..8]);
    }

    #[test]
    fn missing_image_is_an_error() {
        let lesson = LoadingImages::new(Some(PathBuf::from("/nonexistent/f.png")));
        let err = lesson.source().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/f.png"));
    }
}
