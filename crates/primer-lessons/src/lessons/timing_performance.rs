use std::time::Instant;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use primer_engine::core::{App, AppControl, FrameCtx, InitCtx};
use primer_engine::geometry::{CircleOptions, ColoredVertex2, indexed_circle};
use primer_engine::input::Key;
use primer_engine::math::{Rng, euclidean_modulo};
use primer_engine::profile::{GpuTimer, RollingAverage};
use primer_engine::render::gray;

use super::Lesson;
use super::support::{PipelineDesc, empty_buffer, init_buffer, shader_module};

const MAX_OBJECTS: usize = 10_000;
const DEFAULT_OBJECTS: usize = 1_000;
const OBJECT_STEP: usize = 250;

/// Seconds between window title refreshes.
const TITLE_INTERVAL: f32 = 0.25;
const LOG_INTERVAL: f32 = 1.0;

/// Per-instance offset and aspect-corrected scale, rewritten every frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
struct DynamicInstance {
    offset: [f32; 2],
    scale: [f32; 2],
}

impl DynamicInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![2 => Float32x2, 3 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 4 => Unorm8x4];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Unorm8x4];

fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: size_of::<ColoredVertex2>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: size_of::<[u8; 4]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR_ATTRS,
        },
        DynamicInstance::layout(),
    ]
}

#[derive(Debug, Clone, PartialEq)]
struct Mover {
    scale: f32,
    offset: [f32; 2],
    velocity: [f32; 2],
}

impl Mover {
    fn random(rng: &mut Rng) -> Self {
        Self {
            scale: rng.range(0.2, 0.5),
            offset: [rng.range(-0.9, 0.9), rng.range(-0.9, 0.9)],
            velocity: [rng.range(-0.1, 0.1), rng.range(-0.1, 0.1)],
        }
    }

    /// Moves by `velocity * dt`, wrapping each coordinate into `[-1.5, 1.5)`.
    fn advance(&mut self, dt: f32) {
        for (o, v) in self.offset.iter_mut().zip(self.velocity) {
            *o = euclidean_modulo(*o + v * dt + 1.5, 3.0) - 1.5;
        }
    }

    fn instance(&self, aspect: f32) -> DynamicInstance {
        DynamicInstance {
            offset: self.offset,
            scale: [self.scale / aspect, self.scale],
        }
    }
}

fn step_count(current: usize, up: bool) -> usize {
    let next = if up {
        current.saturating_add(OBJECT_STEP)
    } else {
        current.saturating_sub(OBJECT_STEP)
    };
    next.clamp(1, MAX_OBJECTS)
}

struct Resources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    dynamic_buffer: wgpu::Buffer,
    num_indices: u32,
    timer: Option<GpuTimer>,
}

struct Stats {
    fps: RollingAverage,
    cpu_ms: RollingAverage,
    gpu_us: RollingAverage,
    last_title: f32,
    last_log: f32,
}

impl Stats {
    fn new() -> Self {
        Self {
            fps: RollingAverage::default(),
            cpu_ms: RollingAverage::default(),
            gpu_us: RollingAverage::default(),
            last_title: f32::NEG_INFINITY,
            last_log: 0.0,
        }
    }

    fn summary(&self, has_gpu_timer: bool) -> String {
        let gpu = if has_gpu_timer {
            format!("{:.1}µs", self.gpu_us.get())
        } else {
            "n/a".to_string()
        };
        format!(
            "fps: {:.1}  cpu: {:.1}ms  gpu: {gpu}",
            self.fps.get(),
            self.cpu_ms.get()
        )
    }
}

/// Thousands of drifting rings with frame, CPU and GPU timings.
pub struct TimingPerformance {
    rng: Rng,
    num_objects: usize,
    movers: Vec<Mover>,
    instances: Vec<DynamicInstance>,
    stats: Stats,
    res: Option<Resources>,
}

impl TimingPerformance {
    pub fn new(rng: Rng) -> Self {
        Self {
            rng,
            num_objects: DEFAULT_OBJECTS,
            movers: Vec::new(),
            instances: Vec::new(),
            stats: Stats::new(),
            res: None,
        }
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_, '_>) {
        let before = self.num_objects;
        if ctx.input_frame.key_pressed(Key::ArrowUp) {
            self.num_objects = step_count(self.num_objects, true);
        }
        if ctx.input_frame.key_pressed(Key::ArrowDown) {
            self.num_objects = step_count(self.num_objects, false);
        }
        if self.num_objects != before {
            log::info!("drawing {} objects", self.num_objects);
        }
    }

    fn report(&mut self, ctx: &FrameCtx<'_, '_>, has_gpu_timer: bool) {
        let now = ctx.time.elapsed;
        if now - self.stats.last_title >= TITLE_INTERVAL {
            self.stats.last_title = now;
            let title = format!(
                "{}  |  {} objects  |  {}",
                Lesson::TimingPerformance.title(),
                self.num_objects,
                self.stats.summary(has_gpu_timer)
            );
            ctx.window.set_title(&title);
        }
        if now - self.stats.last_log >= LOG_INTERVAL {
            self.stats.last_log = now;
            log::info!("{} objects, {}", self.num_objects, self.stats.summary(has_gpu_timer));
        }
    }
}

impl App for TimingPerformance {
    fn on_init(&mut self, ctx: &InitCtx<'_>) -> Result<()> {
        let device = ctx.device;
        let module = shader_module(device, "timing shaders", include_str!("../shaders/timing_performance.wgsl"));
        let buffers = vertex_layouts();
        let pipeline = PipelineDesc::new("timing pipeline", &module, ctx.surface_format)
            .buffers(&buffers)
            .build(device);

        let rng = &mut self.rng;
        let colors: Vec<[u8; 4]> = (0..MAX_OBJECTS)
            .map(|_| {
                let [r, g, b, _] = rng.color();
                [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255]
            })
            .collect();
        self.movers = (0..MAX_OBJECTS).map(|_| Mover::random(rng)).collect();
        self.instances = vec![DynamicInstance::default(); MAX_OBJECTS];

        let circle = indexed_circle(&CircleOptions {
            radius: 0.25,
            inner_radius: 0.1,
            ..CircleOptions::default()
        });

        self.res = Some(Resources {
            pipeline,
            vertex_buffer: init_buffer(
                device,
                "timing vertex buffer",
                bytemuck::cast_slice(&circle.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: init_buffer(
                device,
                "timing index buffer",
                bytemuck::cast_slice(&circle.indices),
                wgpu::BufferUsages::INDEX,
            ),
            color_buffer: init_buffer(
                device,
                "static colors",
                bytemuck::cast_slice(&colors),
                wgpu::BufferUsages::VERTEX,
            ),
            dynamic_buffer: empty_buffer(
                device,
                "offsets and scales",
                (MAX_OBJECTS * size_of::<DynamicInstance>()) as wgpu::BufferAddress,
                wgpu::BufferUsages::VERTEX,
            ),
            num_indices: circle.indices.len() as u32,
            timer: GpuTimer::new(device, ctx.queue),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.res.is_none() {
            return AppControl::Continue;
        }
        let cpu_start = Instant::now();
        self.handle_keys(ctx);

        let dt = ctx.time.dt;
        let n = self.num_objects;
        for mover in &mut self.movers[..n] {
            mover.advance(dt);
        }

        let Some(res) = &self.res else {
            return AppControl::Continue;
        };
        let movers = &self.movers[..n];
        let instances = &mut self.instances[..n];
        let mut cpu_ms = None;

        let control = ctx.render("timing frame", |rctx, target| {
            let aspect = rctx.aspect();
            for (instance, mover) in instances.iter_mut().zip(movers) {
                *instance = mover.instance(aspect);
            }
            rctx.queue
                .write_buffer(&res.dynamic_buffer, 0, bytemuck::cast_slice(instances));

            {
                let timestamps = res.timer.as_ref().map(GpuTimer::timestamp_writes);
                let mut pass = target.begin_pass("timing pass", gray(0.8), None, timestamps);
                pass.set_pipeline(&res.pipeline);
                pass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, res.color_buffer.slice(..));
                pass.set_vertex_buffer(2, res.dynamic_buffer.slice(..));
                pass.set_index_buffer(res.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..res.num_indices, 0, 0..n as u32);
            }

            if let Some(timer) = &res.timer {
                timer.resolve(target.encoder);
            }
            cpu_ms = Some(cpu_start.elapsed().as_secs_f64() * 1000.0);
        });

        let has_gpu_timer = res.timer.is_some();
        if let Some(timer) = &res.timer {
            timer.begin_readback();
            if let Some(ns) = timer.poll(ctx.gpu.device()) {
                self.stats.gpu_us.add_sample(ns / 1000.0);
            }
        }

        if dt > 0.0 {
            self.stats.fps.add_sample(1.0 / f64::from(dt));
        }
        if let Some(ms) = cpu_ms {
            self.stats.cpu_ms.add_sample(ms);
        }
        self.report(ctx, has_gpu_timer);
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_packing() {
        let [vertex, color, dynamic] = vertex_layouts();
        assert_eq!(vertex.array_stride, 12);
        assert_eq!(color.array_stride, 4);
        assert_eq!(dynamic.array_stride, 16);
        assert_eq!(DynamicInstance::ATTRS[1].offset, 8);
    }

    #[test]
    fn movers_wrap_around_the_edges() {
        let mut mover = Mover {
            scale: 0.3,
            offset: [1.45, -1.45],
            velocity: [0.1, -0.1],
        };
        mover.advance(1.0);
        assert!((mover.offset[0] - -1.45).abs() < 1e-5, "{:?}", mover.offset);
        assert!((mover.offset[1] - 1.45).abs() < 1e-5, "{:?}", mover.offset);
    }

    #[test]
    fn instance_divides_scale_by_aspect() {
        let mover = Mover {
            scale: 0.4,
            offset: [0.1, 0.2],
            velocity: [0.0, 0.0],
        };
        let instance = mover.instance(2.0);
        assert_eq!(instance.offset, [0.1, 0.2]);
        assert_eq!(instance.scale, [0.2, 0.4]);
    }

    #[test]
    fn object_count_is_clamped() {
        assert_eq!(step_count(DEFAULT_OBJECTS, true), 1_250);
        assert_eq!(step_count(100, false), 1);
        assert_eq!(step_count(MAX_OBJECTS, true), MAX_OBJECTS);
    }

    #[test]
    fn summary_without_timer() {
        let stats = Stats::new();
        assert!(stats.summary(false).ends_with("gpu: n/a"));
    }
}
