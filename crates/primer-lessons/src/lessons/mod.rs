//! The lessons, in teaching order.
//!
//! Windowed lessons implement `primer_engine::core::App` and run through the
//! engine runtime; the two compute lessons run headless and print their
//! results.

mod support;

mod basic_compute;
mod camera;
mod compute_shader_basics;
mod inter_stage_variables;
mod loading_images;
mod matrix_math;
mod orthographic;
mod points;
mod red_triangle;
mod storage_buffers;
mod textures;
mod timing_performance;
mod translation;
mod transparency;
mod uniforms;
mod vertex_buffers;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use primer_engine::core::App;
use primer_engine::device::GpuInit;
use primer_engine::math::Rng;
use primer_engine::window::{Runtime, RuntimeConfig};

/// Per-run options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LessonOptions {
    /// Image shown by the image-loading lesson.
    pub image: Option<PathBuf>,
    /// Seed for the scattered objects; the clock is used when absent.
    pub seed: Option<u64>,
}

impl LessonOptions {
    pub(crate) fn rng(&self) -> Rng {
        self.seed.map(Rng::new).unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lesson {
    RedTriangle,
    BasicCompute,
    InterStageVariables,
    Uniforms,
    StorageBuffers,
    VertexBuffers,
    Textures,
    Points,
    ComputeShaderBasics,
    LoadingImages,
    TimingPerformance,
    TransparencyAndBlending,
    Translation,
    MatrixMath,
    Orthographic,
    Camera,
}

impl Lesson {
    pub const ALL: [Lesson; 16] = [
        Lesson::RedTriangle,
        Lesson::BasicCompute,
        Lesson::InterStageVariables,
        Lesson::Uniforms,
        Lesson::StorageBuffers,
        Lesson::VertexBuffers,
        Lesson::Textures,
        Lesson::Points,
        Lesson::ComputeShaderBasics,
        Lesson::LoadingImages,
        Lesson::TimingPerformance,
        Lesson::TransparencyAndBlending,
        Lesson::Translation,
        Lesson::MatrixMath,
        Lesson::Orthographic,
        Lesson::Camera,
    ];

    /// 1-based position in the sequence.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|&l| l == self).map_or(0, |i| i + 1)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Lesson::RedTriangle => "red-triangle",
            Lesson::BasicCompute => "basic-compute",
            Lesson::InterStageVariables => "inter-stage-variables",
            Lesson::Uniforms => "uniforms",
            Lesson::StorageBuffers => "storage-buffers",
            Lesson::VertexBuffers => "vertex-buffers",
            Lesson::Textures => "textures",
            Lesson::Points => "points",
            Lesson::ComputeShaderBasics => "compute-shader-basics",
            Lesson::LoadingImages => "loading-images",
            Lesson::TimingPerformance => "timing-performance",
            Lesson::TransparencyAndBlending => "transparency-and-blending",
            Lesson::Translation => "translation",
            Lesson::MatrixMath => "matrix-math",
            Lesson::Orthographic => "orthographic",
            Lesson::Camera => "camera",
        }
    }

    /// One-line description shown by `--list`.
    pub fn summary(self) -> &'static str {
        match self {
            Lesson::RedTriangle => "one pipeline, one triangle",
            Lesson::BasicCompute => "double an array in a compute pass",
            Lesson::InterStageVariables => "colors interpolated between stages",
            Lesson::Uniforms => "100 triangles, two uniform buffers each",
            Lesson::StorageBuffers => "200 instanced rings read from storage buffers",
            Lesson::VertexBuffers => "the same rings through vertex and index buffers",
            Lesson::Textures => "mip filtering on receding quads (space/click: texture)",
            Lesson::Points => "1000 pixel-sized instanced quads",
            Lesson::ComputeShaderBasics => "workgroup, local and global invocation ids",
            Lesson::LoadingImages => "an image file as a texture (--image <path>)",
            Lesson::TimingPerformance => "fps, CPU and GPU time (up/down: object count)",
            Lesson::TransparencyAndBlending => "a translucent triangle, premultiplied alpha",
            Lesson::Translation => "an F moved in pixels (arrows)",
            Lesson::MatrixMath => "an F through a 3x3 matrix (arrows, q/e, z/x)",
            Lesson::Orthographic => "a solid F under an orthographic projection",
            Lesson::Camera => "five Fs around an orbiting camera",
        }
    }

    /// Window title, e.g. "07 Textures".
    pub fn title(self) -> String {
        let words: Vec<String> = self
            .slug()
            .split('-')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect();
        format!("{:02} {}", self.number(), words.join(" "))
    }

    pub fn run(self, options: &LessonOptions) -> Result<()> {
        log::info!("running lesson {}", self.title());
        match self {
            Lesson::RedTriangle => windowed(self, red_triangle::RedTriangle::default()),
            Lesson::BasicCompute => basic_compute::run(),
            Lesson::InterStageVariables => {
                windowed(self, inter_stage_variables::InterStageVariables::default())
            }
            Lesson::Uniforms => windowed(self, uniforms::Uniforms::new(options.rng())),
            Lesson::StorageBuffers => {
                windowed(self, storage_buffers::StorageBuffers::new(options.rng()))
            }
            Lesson::VertexBuffers => windowed(self, vertex_buffers::VertexBuffers::new(options.rng())),
            Lesson::Textures => windowed(self, textures::Textures::default()),
            Lesson::Points => windowed(self, points::Points::new(options.rng())),
            Lesson::ComputeShaderBasics => compute_shader_basics::run(),
            Lesson::LoadingImages => {
                windowed(self, loading_images::LoadingImages::new(options.image.clone()))
            }
            Lesson::TimingPerformance => Runtime::run(
                config(self),
                GpuInit::default()
                    .with_optional_features(wgpu::Features::TIMESTAMP_QUERY),
                timing_performance::TimingPerformance::new(options.rng()),
            ),
            Lesson::TransparencyAndBlending => {
                composited(self, transparency::Transparency::default())
            }
            Lesson::Translation => composited(self, translation::Translation::new(options.rng())),
            Lesson::MatrixMath => composited(self, matrix_math::MatrixMath::new(options.rng())),
            Lesson::Orthographic => composited(self, orthographic::Orthographic::new(options.rng())),
            Lesson::Camera => composited(self, camera::Camera::default()),
        }
    }
}

fn config(lesson: Lesson) -> RuntimeConfig {
    RuntimeConfig {
        title: lesson.title(),
        ..RuntimeConfig::default()
    }
}

fn windowed<A: App + 'static>(lesson: Lesson, app: A) -> Result<()> {
    Runtime::run(config(lesson), GpuInit::default(), app)
}

/// Runs `app` on a transparent window with a premultiplied-alpha surface.
fn composited<A: App + 'static>(lesson: Lesson, app: A) -> Result<()> {
    let config = RuntimeConfig {
        transparent: true,
        ..config(lesson)
    };
    let init = GpuInit::default().with_alpha_mode(wgpu::CompositeAlphaMode::PreMultiplied);
    Runtime::run(config, init, app)
}

/// Returned when a lesson name matches neither a number nor a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLessonError {
    pub input: String,
}

impl fmt::Display for ParseLessonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lesson {:?}; expected one of:", self.input)?;
        for lesson in Lesson::ALL {
            write!(f, "\n  {:02} {}", lesson.number(), lesson.slug())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseLessonError {}

impl FromStr for Lesson {
    type Err = ParseLessonError;

    /// Accepts a number (`7`, `07`) or a slug (`textures`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let found = match needle.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied(),
            Err(_) => Self::ALL.iter().copied().find(|l| l.slug() == needle),
        };
        found.ok_or_else(|| ParseLessonError {
            input: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_slugs() {
        assert_eq!("1".parse(), Ok(Lesson::RedTriangle));
        assert_eq!("07".parse(), Ok(Lesson::Textures));
        assert_eq!("Camera".parse(), Ok(Lesson::Camera));
        assert_eq!(" matrix-math ".parse(), Ok(Lesson::MatrixMath));
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!("0".parse::<Lesson>().is_err());
        assert!("17".parse::<Lesson>().is_err());
    }

    #[test]
    fn parse_error_lists_choices() {
        let err = "triangle".parse::<Lesson>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"triangle\""));
        assert!(msg.contains("01 red-triangle"));
        assert!(msg.contains("16 camera"));
    }

    #[test]
    fn numbering_follows_order() {
        for (i, lesson) in Lesson::ALL.iter().enumerate() {
            assert_eq!(lesson.number(), i + 1);
            assert_eq!(lesson.slug().parse(), Ok(*lesson));
        }
    }

    #[test]
    fn titles_capitalize_slug_words() {
        assert_eq!(Lesson::RedTriangle.title(), "01 Red Triangle");
        assert_eq!(Lesson::TransparencyAndBlending.title(), "12 Transparency And Blending");
    }
}
