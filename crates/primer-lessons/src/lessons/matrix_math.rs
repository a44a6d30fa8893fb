use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::input::{InputState, Key};
use primer_engine::math::{Mat3, Rng, Vec2, mat3_uniform, pixel_to_clip_2d};

use super::support::{
    CLEAR_TRANSPARENT, IndexedMesh, PipelineDesc, arrow_axes, buffer_bind_group, empty_buffer,
    position_2d_layout, shader_module,
};

const MOVE_SPEED: f32 = 200.0;
const TURN_SPEED: f32 = 90.0;
const SCALE_SPEED: f32 = 1.0;

/// Offset putting the F's rotation origin near its middle.
const MOVE_ORIGIN: Vec2 = Vec2::new(-50.0, -75.0);

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    color: [f32; 4],
    resolution: [f32; 2],
    _pad: [f32; 2],
    matrix: [f32; 12],
}

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    translate: Vec2,
    /// Degrees.
    rotation: f32,
    scale: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translate: Vec2::new(100.0, 100.0),
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Settings {
    /// Arrows move, Q/E rotate, Z/X shrink and grow.
    fn update(&mut self, input: &InputState, dt: f32) {
        self.translate = (self.translate + arrow_axes(input) * MOVE_SPEED * dt)
            .clamp(Vec2::ZERO, Vec2::splat(500.0));
        self.rotation =
            (self.rotation + input.axis(Key::Q, Key::E) * TURN_SPEED * dt).rem_euclid(360.0);
        let grow = input.axis(Key::Z, Key::X) * SCALE_SPEED * dt;
        self.scale = (self.scale + Vec2::splat(grow)).clamp(Vec2::splat(-5.0), Vec2::splat(5.0));
    }

    fn matrix(&self, width: f32, height: f32) -> Mat3 {
        pixel_to_clip_2d(width, height)
            * Mat3::from_translation(self.translate)
            * Mat3::from_angle(self.rotation.to_radians())
            * Mat3::from_scale(self.scale)
            * Mat3::from_translation(MOVE_ORIGIN)
    }
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    mesh: IndexedMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// The 2D "F" placed by one 3x3 matrix built from translation, rotation and scale.
pub struct MatrixMath {
    color: [f32; 4],
    settings: Settings,
    res: Option<Resources>,
}

impl MatrixMath {
    pub fn new(mut rng: Rng) -> Self {
        Self {
            color: rng.color(),
            settings: Settings::default(),
            res: None,
        }
    }
}

impl App for MatrixMath {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "matrix math shaders", include_str!("../shaders/matrix_math.wgsl"));
        let pipeline = PipelineDesc::new("matrix math pipeline", &module, ctx.surface_format)
            .buffers(&[position_2d_layout()])
            .build(device);

        let uniform_buffer = empty_buffer(
            device,
            "matrix uniforms",
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

        self.settings.update(ctx.input, ctx.time.dt);
        let viewport = ctx.window.viewport();
        let uniforms = Uniforms {
            color: self.color,
            resolution: [viewport.width, viewport.height],
            _pad: [0.0; 2],
            matrix: mat3_uniform(self.settings.matrix(viewport.width, viewport.height)),
        };

        ctx.render("matrix math frame", |rctx, target| {
            rctx.queue
                .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

            let mut pass = target.begin_pass("matrix math pass", CLEAR_TRANSPARENT, None, None);
            pass.set_pipeline(&res.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            res.mesh.draw(&mut pass, 1);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(size_of::<Uniforms>(), 80);
        assert_eq!(std::mem::offset_of!(Uniforms, matrix), 32);
    }

    #[test]
    fn origin_offset_lands_on_translation() {
        let settings = Settings::default();
        let m = Settings {
            translate: Vec2::new(400.0, 300.0),
            ..settings
        }
        .matrix(800.0, 600.0);
        // The F's (50, 75) is its pivot; it ends up at the window center.
        assert!(near(m.transform_point2(Vec2::new(50.0, 75.0)), Vec2::ZERO));
    }

    #[test]
    fn rotation_wraps_into_degrees() {
        let mut input = InputState::default();
        input.held_keys.insert(Key::Q);
        let mut settings = Settings::default();
        settings.update(&input, 1.0);
        assert_eq!(settings.rotation, 270.0);
        assert_eq!(settings.translate, Vec2::new(100.0, 100.0));
    }
}
