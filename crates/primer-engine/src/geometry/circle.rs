use std::f32::consts::TAU;

use super::{unorm8, ColoredVertex2};

/// Parameters for a ring (or disc, when `inner_radius` is zero) in clip units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleOptions {
    pub radius: f32,
    pub subdivisions: u32,
    pub inner_radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            subdivisions: 24,
            inner_radius: 0.0,
            start_angle: 0.0,
            end_angle: TAU,
        }
    }
}

impl CircleOptions {
    fn angle(&self, i: u32) -> f32 {
        self.start_angle + i as f32 * (self.end_angle - self.start_angle) / self.subdivisions as f32
    }
}

/// Triangle-list positions for a ring, two triangles per subdivision.
///
/// ```text
/// 0--1 4
/// | / /|
/// |/ / |
/// 2 3--5
/// ```
pub fn circle_vertices(options: &CircleOptions) -> Vec<[f32; 2]> {
    let CircleOptions {
        radius,
        inner_radius,
        ..
    } = *options;

    let mut out = Vec::with_capacity(options.subdivisions as usize * 6);
    for i in 0..options.subdivisions {
        let (s1, c1) = options.angle(i).sin_cos();
        let (s2, c2) = options.angle(i + 1).sin_cos();

        out.push([c1 * radius, s1 * radius]);
        out.push([c2 * radius, s2 * radius]);
        out.push([c1 * inner_radius, s1 * inner_radius]);

        out.push([c1 * inner_radius, s1 * inner_radius]);
        out.push([c2 * radius, s2 * radius]);
        out.push([c2 * inner_radius, s2 * inner_radius]);
    }
    out
}

/// Indexed ring with a dark outer edge and a white inner edge.
#[derive(Debug, Clone)]
pub struct IndexedCircle {
    pub vertices: Vec<ColoredVertex2>,
    pub indices: Vec<u32>,
}

const OUTER_COLOR: f32 = 0.1;
const INNER_COLOR: f32 = 1.0;

/// Builds a ring as a strip of alternating outer/inner vertices plus indices.
///
/// ```text
/// 0--2        2     2--4
/// | /        /|     | /
/// |/        / |     |/
/// 1        1--3     3
/// ```
pub fn indexed_circle(options: &CircleOptions) -> IndexedCircle {
    let vertex_at = |x: f32, y: f32, c: f32| ColoredVertex2 {
        position: [x, y],
        color: [unorm8(c), unorm8(c), unorm8(c), 255],
    };

    let mut vertices = Vec::with_capacity((options.subdivisions as usize + 1) * 2);
    for i in 0..=options.subdivisions {
        let (s, c) = options.angle(i).sin_cos();
        vertices.push(vertex_at(c * options.radius, s * options.radius, OUTER_COLOR));
        vertices.push(vertex_at(
            c * options.inner_radius,
            s * options.inner_radius,
            INNER_COLOR,
        ));
    }

    let mut indices = Vec::with_capacity(options.subdivisions as usize * 6);
    for i in 0..options.subdivisions {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    IndexedCircle { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn triangle_list_has_six_vertices_per_subdivision() {
        let verts = circle_vertices(&CircleOptions::default());
        assert_eq!(verts.len(), 24 * 6);
    }

    #[test]
    fn ring_vertices_lie_on_their_radius() {
        let opts = CircleOptions {
            radius: 0.25,
            inner_radius: 0.1,
            subdivisions: 8,
            ..CircleOptions::default()
        };
        let verts = circle_vertices(&opts);

        assert!(close(verts[0], [0.25, 0.0]));
        assert!(close(verts[2], [0.1, 0.0]));
        // Second triangle starts on the inner edge it shares with the first.
        assert_eq!(verts[2], verts[3]);
        assert_eq!(verts[1], verts[4]);

        for v in &verts {
            let r = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!((r - 0.25).abs() < 1e-5 || (r - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn disc_collapses_inner_edge_to_center() {
        let verts = circle_vertices(&CircleOptions {
            subdivisions: 4,
            ..CircleOptions::default()
        });
        assert!(close(verts[2], [0.0, 0.0]));
        assert!(close(verts[5], [0.0, 0.0]));
    }

    #[test]
    fn indexed_ring_wraps_around() {
        let ring = indexed_circle(&CircleOptions {
            subdivisions: 24,
            inner_radius: 0.5,
            ..CircleOptions::default()
        });

        assert_eq!(ring.vertices.len(), 50);
        assert_eq!(ring.indices.len(), 144);
        assert_eq!(&ring.indices[..6], &[0, 1, 2, 2, 1, 3]);
        assert_eq!(ring.indices.iter().copied().max(), Some(49));

        let first = ring.vertices[0].position;
        let last = ring.vertices[48].position;
        assert!(close(first, last));
    }

    #[test]
    fn indexed_ring_colors_outer_dark_inner_white() {
        let ring = indexed_circle(&CircleOptions::default());
        assert_eq!(ring.vertices[0].color, [25, 25, 25, 255]);
        assert_eq!(ring.vertices[1].color, [255, 255, 255, 255]);
    }
}
