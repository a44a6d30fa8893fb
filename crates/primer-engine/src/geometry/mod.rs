//! CPU-side vertex generators.
//!
//! Positions are plain `f32` arrays and colors are `unorm8x4` bytes so the
//! output can be uploaded with `bytemuck::cast_slice` unchanged.

mod circle;
mod f_shape;

use bytemuck::{Pod, Zeroable};

pub use circle::{circle_vertices, indexed_circle, CircleOptions, IndexedCircle};
pub use f_shape::{f_2d, f_3d, f_3d_centered, FShape2d};

/// 2D position with a packed RGBA8 color (12 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex2 {
    pub position: [f32; 2],
    pub color: [u8; 4],
}

/// 3D position with a packed RGBA8 color (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex3 {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

/// Converts a `[0, 1]` channel the way a `Uint8Array` store does: scale by 255
/// and truncate.
#[inline]
pub(crate) fn unorm8(c: f32) -> u8 {
    (c * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_shader_layouts() {
        assert_eq!(std::mem::size_of::<ColoredVertex2>(), 12);
        assert_eq!(std::mem::size_of::<ColoredVertex3>(), 16);
    }

    #[test]
    fn unorm8_truncates() {
        assert_eq!(unorm8(0.1), 25);
        assert_eq!(unorm8(1.0), 255);
        assert_eq!(unorm8(-0.5), 0);
    }
}
