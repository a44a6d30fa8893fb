//! Transform helpers and deterministic random numbers.
//!
//! Matrices are `glam` types: column-major, right-handed, clip depth in
//! `[0, 1]` (the WebGPU convention).

mod random;
mod transform;

pub use random::Rng;
pub use transform::{
    euclidean_modulo, look_at, mat3_uniform, ortho, perspective, pixel_projection,
    pixel_to_clip_2d,
};

pub use glam::{Mat3, Mat4, Vec2, Vec3};
