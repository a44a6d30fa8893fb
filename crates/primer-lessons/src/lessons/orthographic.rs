use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::geometry::f_3d;
use primer_engine::input::{InputState, Key};
use primer_engine::math::{Mat4, Rng, Vec3, ortho};
use primer_engine::render::DepthTarget;

use super::support::{
    CLEAR_TRANSPARENT, PipelineDesc, arrow_axes, buffer_bind_group, colored_3d_layout, empty_buffer,
    init_buffer, shader_module,
};

const MOVE_SPEED: f32 = 200.0;
const TURN_SPEED: f32 = 60.0;
const SCALE_SPEED: f32 = 1.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    color: [f32; 4],
    matrix: [f32; 16],
}

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    translate: Vec3,
    /// Degrees around X, Y and Z.
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translate: Vec3::new(100.0, 100.0, 0.0),
            rotation: Vec3::new(30.0, 30.0, 0.0),
            scale: Vec3::splat(2.0),
        }
    }
}

impl Settings {
    /// Arrows move, Q/E spin around Y, Z/X shrink and grow.
    fn update(&mut self, input: &InputState, dt: f32) {
        self.translate += arrow_axes(input).extend(0.0) * MOVE_SPEED * dt;
        self.rotation.y = (self.rotation.y + input.axis(Key::Q, Key::E) * TURN_SPEED * dt).rem_euclid(360.0);
        self.scale += Vec3::splat(input.axis(Key::Z, Key::X) * SCALE_SPEED * dt);
    }

    /// Pixel-space orthographic projection (y down, z in `[-400, 400]`)
    /// times the model transform.
    fn matrix(&self, width: f32, height: f32) -> Mat4 {
        let r = self.rotation * (std::f32::consts::PI / 180.0);
        ortho(0.0, width, height, 0.0, 400.0, -400.0)
            * Mat4::from_translation(self.translate)
            * Mat4::from_rotation_x(r.x)
            * Mat4::from_rotation_y(r.y)
            * Mat4::from_rotation_z(r.z)
            * Mat4::from_scale(self.scale)
    }
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    num_vertices: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// The solid 3D "F" under an orthographic projection, depth tested.
pub struct Orthographic {
    color: [f32; 4],
    settings: Settings,
    depth: DepthTarget,
    res: Option<Resources>,
}

impl Orthographic {
    pub fn new(mut rng: Rng) -> Self {
        Self {
            color: rng.color(),
            settings: Settings::default(),
            depth: DepthTarget::default(),
            res: None,
        }
    }
}

impl App for Orthographic {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "orthographic shaders", include_str!("../shaders/orthographic.wgsl"));
        let pipeline = PipelineDesc::new("orthographic pipeline", &module, ctx.surface_format)
            .buffers(&[colored_3d_layout()])
            .cull(wgpu::Face::Front)
            .depth(self.depth.stencil_state())
            .build(device);

        let vertices = f_3d();
        let vertex_buffer = init_buffer(
            device,
            "F vertices",
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        );
        let uniform_buffer = empty_buffer(
            device,
            "orthographic uniforms",
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
            vertex_buffer,
            num_vertices: vertices.len() as u32,
            uniform_buffer,
            bind_group,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        self.settings.update(ctx.input, ctx.time.dt);
        let viewport = ctx.window.viewport();
        let uniforms = Uniforms {
            color: self.color,
            matrix: self.settings.matrix(viewport.width, viewport.height).to_cols_array(),
        };
        let depth = &mut self.depth;

        ctx.render("orthographic frame", |rctx, target| {
            rctx.queue
                .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

            let depth_view = depth.view(rctx.device, rctx.size);
            let mut pass = target.begin_pass("orthographic pass", CLEAR_TRANSPARENT, Some(depth_view), None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
            pass.draw(0..res.num_vertices, 0..1);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_80_bytes() {
        assert_eq!(size_of::<Uniforms>(), 80);
    }

    #[test]
    fn translation_is_in_pixels() {
        let settings = Settings {
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            ..Settings::default()
        };
        let clip = settings.matrix(200.0, 200.0).project_point3(Vec3::ZERO);
        // (100, 100) is the middle of a 200x200 window; z = 0 sits halfway in depth.
        assert!(clip.truncate().length() < 1e-5, "{clip}");
        assert!((clip.z - 0.5).abs() < 1e-5, "{clip}");
    }
}
