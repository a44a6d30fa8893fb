use std::f32::consts::TAU;

use anyhow::Result;
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::geometry::f_3d_centered;
use primer_engine::input::{InputState, Key};
use primer_engine::math::{Mat4, Vec3, look_at, perspective};
use primer_engine::render::DepthTarget;

use super::support::{
    CLEAR_TRANSPARENT, PipelineDesc, buffer_bind_group, colored_3d_layout, empty_buffer, init_buffer,
    shader_module,
};

const NUM_OBJECTS: usize = 5;
/// Largest distance from an F's origin to any of its vertices.
const F_EXTENT: f32 = 200.0;

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    /// Vertical field of view, degrees.
    fov: f32,
    /// Camera position around the ring, degrees.
    camera_angle: f32,
    radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            camera_angle: 30.0,
            radius: 200.0,
        }
    }
}

impl Settings {
    /// Left/Right orbit, Up/Down change the radius, PageUp/PageDown the fov.
    fn update(&mut self, input: &InputState, dt: f32) {
        self.camera_angle = (self.camera_angle + input.axis(Key::ArrowLeft, Key::ArrowRight) * 60.0 * dt)
            .rem_euclid(360.0);
        self.radius = (self.radius + input.axis(Key::ArrowDown, Key::ArrowUp) * 100.0 * dt).clamp(10.0, 1000.0);
        self.fov = (self.fov + input.axis(Key::PageDown, Key::PageUp) * 30.0 * dt).clamp(10.0, 170.0);
    }

    fn eye(&self) -> Vec3 {
        let a = self.camera_angle.to_radians();
        Vec3::new(a.sin() * 5.0 * self.radius, self.radius, a.cos() * 5.0 * self.radius)
    }

    /// Reaches past the far side of the ring, with room for the F itself.
    fn far_plane(&self) -> f32 {
        (self.eye().length() + self.radius + F_EXTENT).max(2000.0)
    }

    fn view_projection(&self, aspect: f32) -> Mat4 {
        perspective(self.fov.to_radians(), aspect, 1.0, self.far_plane())
            * look_at(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// Where object `i` stands on the ring.
    fn object_position(&self, i: usize) -> Vec3 {
        let angle = i as f32 / NUM_OBJECTS as f32 * TAU;
        Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }
}

struct Object {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    num_vertices: u32,
    objects: Vec<Object>,
}

/// Five "F"s on a ring, seen through a perspective camera circling them.
#[derive(Default)]
pub struct Camera {
    settings: Settings,
    depth: DepthTarget,
    res: Option<Resources>,
}

impl App for Camera {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "camera shaders", include_str!("../shaders/camera.wgsl"));
        let pipeline = PipelineDesc::new("camera pipeline", &module, ctx.surface_format)
            .buffers(&[colored_3d_layout()])
            .cull(wgpu::Face::Back)
            .depth(self.depth.stencil_state())
            .build(device);
        let layout = pipeline.get_bind_group_layout(0);

        let objects = (0..NUM_OBJECTS)
            .map(|i| {
                let uniform_buffer = empty_buffer(
                    device,
                    &format!("matrix for F {i}"),
                    size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    wgpu::BufferUsages::UNIFORM,
                );
                let bind_group = buffer_bind_group(device, "bind group for uniforms", &layout, &[&uniform_buffer]);
                Object {
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        let vertices = f_3d_centered();
        self.res = Some(Resources {
            pipeline,
            vertex_buffer: init_buffer(
                device,
                "F vertices",
                bytemuck::cast_slice(&vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            num_vertices: vertices.len() as u32,
            objects,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = &self.res else {
            return AppControl::Continue;
        };

        self.settings.update(ctx.input, ctx.time.dt);
        let settings = &self.settings;
        let view_projection = settings.view_projection(ctx.window.viewport().aspect());
        let depth = &mut self.depth;

        ctx.render("camera frame", |rctx, target| {
            let depth_view = depth.view(rctx.device, rctx.size);
            let mut pass = target.begin_pass("camera pass", CLEAR_TRANSPARENT, Some(depth_view), None);
            pass.set_pipeline(&res.pipeline);
            pass.set_vertex_buffer(0, res.vertex_buffer.slice(..));

            for (i, obj) in res.objects.iter().enumerate() {
                let matrix = view_projection * Mat4::from_translation(settings.object_position(i));
                rctx.queue
                    .write_buffer(&obj.uniform_buffer, 0, bytemuck::cast_slice(&matrix.to_cols_array()));
                pass.set_bind_group(0, &obj.bind_group, &[]);
                pass.draw(0..res.num_vertices, 0..1);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_orbits_at_five_radii() {
        let settings = Settings {
            camera_angle: 0.0,
            ..Settings::default()
        };
        assert_eq!(settings.eye(), Vec3::new(0.0, 200.0, 1000.0));
    }

    #[test]
    fn objects_sit_on_the_ring() {
        let settings = Settings::default();
        let first = settings.object_position(0);
        assert!((first - Vec3::new(200.0, 0.0, 0.0)).length() < 1e-3);
        for i in 0..NUM_OBJECTS {
            let p = settings.object_position(i);
            assert!((p.length() - settings.radius).abs() < 1e-3);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn ring_center_projects_to_screen_center() {
        let vp = Settings::default().view_projection(1.5);
        let center = vp.project_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5, "{center}");
        assert!((0.0..1.0).contains(&center.z));
    }

    #[test]
    fn whole_ring_fits_between_the_planes_at_any_radius() {
        for radius in [10.0, 200.0, 490.0, 1000.0] {
            let settings = Settings { radius, ..Settings::default() };
            let vp = settings.view_projection(1.5);
            for i in 0..NUM_OBJECTS {
                let z = vp.project_point3(settings.object_position(i)).z;
                assert!((0.0..1.0).contains(&z), "radius {radius} object {i}: z {z}");
            }
        }
    }

    #[test]
    fn settings_stay_in_range() {
        let mut input = InputState::default();
        input.held_keys.insert(Key::ArrowDown);
        input.held_keys.insert(Key::PageUp);
        let mut settings = Settings::default();
        settings.update(&input, 100.0);
        assert_eq!(settings.radius, 10.0);
        assert_eq!(settings.fov, 170.0);
    }
}
