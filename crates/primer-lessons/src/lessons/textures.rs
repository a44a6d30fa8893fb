use std::f32::consts::FRAC_PI_2;

use anyhow::Result;
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::input::Key;
use primer_engine::math::{Mat4, Vec3, look_at, perspective};
use primer_engine::render::gray;
use primer_engine::texture::{blended_mipmap, checked_mipmap, create_texture_with_mips};

use super::support::{PipelineDesc, empty_buffer, shader_module};

const NUM_QUADS: usize = 8;
const Z_DEPTH: f32 = 50.0;

/// Sampler for quad `i`: bit 0 picks the mag filter, bit 1 the min filter,
/// bit 2 the mipmap filter (set means linear).
fn sampler_descriptor(i: usize) -> wgpu::SamplerDescriptor<'static> {
    let filter = |bit: usize| {
        if i & bit != 0 {
            wgpu::FilterMode::Linear
        } else {
            wgpu::FilterMode::Nearest
        }
    };
    let mipmap_filter = if i & 4 != 0 {
        wgpu::MipmapFilterMode::Linear
    } else {
        wgpu::MipmapFilterMode::Nearest
    };

    wgpu::SamplerDescriptor {
        label: Some("quad sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: filter(1),
        min_filter: filter(2),
        mipmap_filter,
        ..Default::default()
    }
}

/// Lays quad `i` on the floor (top row) or ceiling (bottom row), stretched
/// far down the -Z axis.
fn quad_matrix(view_projection: Mat4, i: usize) -> Mat4 {
    let x = (i % 4) as f32 - 1.5;
    let y = if i < 4 { 1.0 } else { -1.0 };

    view_projection
        * Mat4::from_translation(Vec3::new(x * 1.2, y * 0.7, -Z_DEPTH * 0.5))
        * Mat4::from_rotation_x(FRAC_PI_2)
        * Mat4::from_scale(Vec3::new(1.0, Z_DEPTH * 2.0, 1.0))
        * Mat4::from_translation(Vec3::new(-0.5, -0.5, 0.0))
}

struct Quad {
    uniform_buffer: wgpu::Buffer,
    /// One bind group per texture.
    bind_groups: Vec<wgpu::BindGroup>,
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    quads: Vec<Quad>,
}

/// Eight receding quads comparing every filter combination on mipmapped
/// textures. Click or Space switches texture.
#[derive(Default)]
pub struct Textures {
    texture_index: usize,
    res: Option<Resources>,
}

impl App for Textures {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "textured quad shaders", include_str!("../shaders/textures.wgsl"));
        let pipeline = PipelineDesc::new("textured quad pipeline", &module, ctx.surface_format).build(device);
        let layout = pipeline.get_bind_group_layout(0);

        let views = [
            create_texture_with_mips(device, ctx.queue, &blended_mipmap(), "blended")?,
            create_texture_with_mips(device, ctx.queue, &checked_mipmap(), "checker")?,
        ]
        .map(|texture| texture.create_view(&wgpu::TextureViewDescriptor::default()));

        let quads = (0..NUM_QUADS)
            .map(|i| {
                let sampler = device.create_sampler(&sampler_descriptor(i));
                let uniform_buffer = empty_buffer(
                    device,
                    "uniforms for quad",
                    size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    wgpu::BufferUsages::UNIFORM,
                );
                let bind_groups = views
                    .iter()
                    .map(|view| {
                        device.create_bind_group(&wgpu::BindGroupDescriptor {
                            label: Some("quad bind group"),
                            layout: &layout,
                            entries: &[
                                wgpu::BindGroupEntry {
                                    binding: 0,
                                    resource: wgpu::BindingResource::Sampler(&sampler),
                                },
                                wgpu::BindGroupEntry {
                                    binding: 1,
                                    resource: wgpu::BindingResource::TextureView(view),
                                },
                                wgpu::BindGroupEntry {
                                    binding: 2,
                                    resource: uniform_buffer.as_entire_binding(),
                                },
                            ],
                        })
                    })
                    .collect();
                Quad {
                    uniform_buffer,
                    bind_groups,
                }
            })
            .collect();

        self.res = Some(Resources { pipeline, quads });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        if ctx.input_frame.clicked() || ctx.input_frame.key_pressed(Key::Space) {
            self.texture_index = (self.texture_index + 1) % 2;
            log::debug!("showing texture {}", self.texture_index);
        }
        let texture_index = self.texture_index;

        ctx.render("textures frame", |rctx, target| {
            let projection = perspective(60f32.to_radians(), rctx.aspect(), 1.0, 2000.0);
            let view = look_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y);
            let view_projection = projection * view;

            let mut pass = target.begin_pass("textures pass", gray(0.8), None, None);
            pass.set_pipeline(&res.pipeline);

            for (i, quad) in res.quads.iter().enumerate() {
                let matrix = quad_matrix(view_projection, i).to_cols_array();
                rctx.queue
                    .write_buffer(&quad.uniform_buffer, 0, bytemuck::cast_slice(&matrix));
                pass.set_bind_group(0, &quad.bind_groups[texture_index], &[]);
                pass.draw(0..6, 0..1);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn filter_bits_select_modes() {
        let d = sampler_descriptor(0);
        assert_eq!(d.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(d.min_filter, wgpu::FilterMode::Nearest);

        let d = sampler_descriptor(5);
        assert_eq!(d.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(d.min_filter, wgpu::FilterMode::Nearest);
        assert_eq!(d.mipmap_filter, wgpu::MipmapFilterMode::Linear);
        assert_eq!(d.address_mode_u, wgpu::AddressMode::Repeat);
    }

    #[test]
    fn quad_centers_form_two_rows() {
        let center = Vec3::new(0.5, 0.5, 0.0);
        let first = quad_matrix(Mat4::IDENTITY, 0).transform_point3(center);
        assert!(near(first, Vec3::new(-1.8, 0.7, -25.0)), "{first}");

        let last = quad_matrix(Mat4::IDENTITY, 7).transform_point3(center);
        assert!(near(last, Vec3::new(1.8, -0.7, -25.0)), "{last}");
    }
}
