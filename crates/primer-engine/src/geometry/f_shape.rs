use super::ColoredVertex3;

/// Flat "F" in pixel units, top-left origin.
#[derive(Debug, Clone)]
pub struct FShape2d {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Flat "F": a 30x150 column, a 70x30 top rung and a 40x30 middle rung.
pub fn f_2d() -> FShape2d {
    #[rustfmt::skip]
    let vertices = vec![
        // left column
        [0.0, 0.0], [30.0, 0.0], [0.0, 150.0], [30.0, 150.0],
        // top rung
        [30.0, 0.0], [100.0, 0.0], [30.0, 30.0], [100.0, 30.0],
        // middle rung
        [30.0, 60.0], [70.0, 60.0], [30.0, 90.0], [70.0, 90.0],
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,    2, 1, 3,
        4, 5, 6,    6, 5, 7,
        8, 9, 10,   10, 9, 11,
    ];

    FShape2d { vertices, indices }
}

/// One color per quad, front faces first.
#[rustfmt::skip]
const QUAD_COLORS: [[u8; 3]; 16] = [
    [200, 70, 120], // left column front
    [200, 70, 120], // top rung front
    [200, 70, 120], // middle rung front
    [80, 70, 200],  // left column back
    [80, 70, 200],  // top rung back
    [80, 70, 200],  // middle rung back
    [70, 200, 210], // top
    [160, 160, 220], // top rung right
    [90, 130, 110], // top rung bottom
    [200, 200, 70], // between top and middle rung
    [210, 100, 70], // middle rung top
    [210, 160, 70], // middle rung right
    [70, 180, 210], // middle rung bottom
    [100, 70, 210], // stem right
    [76, 210, 100], // bottom
    [140, 210, 80], // left
];

/// Solid "F", 30 units deep, in pixel space with +Y down.
///
/// The +Y flip of the pixel projection reverses the apparent winding, so
/// pipelines drawing this solid cull front faces.
pub fn f_3d() -> Vec<ColoredVertex3> {
    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // front
        [0.0, 0.0, 0.0], [30.0, 0.0, 0.0], [0.0, 150.0, 0.0], [30.0, 150.0, 0.0],
        [30.0, 0.0, 0.0], [100.0, 0.0, 0.0], [30.0, 30.0, 0.0], [100.0, 30.0, 0.0],
        [30.0, 60.0, 0.0], [70.0, 60.0, 0.0], [30.0, 90.0, 0.0], [70.0, 90.0, 0.0],
        // back
        [0.0, 0.0, 30.0], [30.0, 0.0, 30.0], [0.0, 150.0, 30.0], [30.0, 150.0, 30.0],
        [30.0, 0.0, 30.0], [100.0, 0.0, 30.0], [30.0, 30.0, 30.0], [100.0, 30.0, 30.0],
        [30.0, 60.0, 30.0], [70.0, 60.0, 30.0], [30.0, 90.0, 30.0], [70.0, 90.0, 30.0],
    ];

    #[rustfmt::skip]
    let indices: [u16; 96] = [
        0, 1, 2,     2, 1, 3,
        4, 5, 6,     6, 5, 7,
        8, 9, 10,    10, 9, 11,

        12, 14, 13,  14, 15, 13,
        16, 18, 17,  18, 19, 17,
        20, 22, 21,  22, 23, 21,

        0, 12, 5,    12, 17, 5,
        5, 17, 7,    17, 19, 7,
        6, 7, 18,    18, 7, 19,
        6, 18, 8,    18, 20, 8,
        8, 20, 9,    20, 21, 9,
        9, 21, 11,   21, 23, 11,
        10, 11, 22,  22, 11, 23,
        10, 22, 3,   22, 15, 3,
        2, 3, 14,    14, 3, 15,
        0, 2, 12,    12, 2, 14,
    ];

    expand(&positions, &indices)
}

/// Solid "F" centered on the origin with +Y up, 30 units deep.
///
/// Wound counter-clockwise from outside for back-face culling.
pub fn f_3d_centered() -> Vec<ColoredVertex3> {
    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // front
        [-50.0, 75.0, 15.0], [-20.0, 75.0, 15.0], [-50.0, -75.0, 15.0], [-20.0, -75.0, 15.0],
        [-20.0, 75.0, 15.0], [50.0, 75.0, 15.0], [-20.0, 45.0, 15.0], [50.0, 45.0, 15.0],
        [-20.0, 15.0, 15.0], [20.0, 15.0, 15.0], [-20.0, -15.0, 15.0], [20.0, -15.0, 15.0],
        // back
        [-50.0, 75.0, -15.0], [-20.0, 75.0, -15.0], [-50.0, -75.0, -15.0], [-20.0, -75.0, -15.0],
        [-20.0, 75.0, -15.0], [50.0, 75.0, -15.0], [-20.0, 45.0, -15.0], [50.0, 45.0, -15.0],
        [-20.0, 15.0, -15.0], [20.0, 15.0, -15.0], [-20.0, -15.0, -15.0], [20.0, -15.0, -15.0],
    ];

    #[rustfmt::skip]
    let indices: [u16; 96] = [
        0, 2, 1,     2, 3, 1,
        4, 6, 5,     6, 7, 5,
        8, 10, 9,    10, 11, 9,

        12, 13, 14,  14, 13, 15,
        16, 17, 18,  18, 17, 19,
        20, 21, 22,  22, 21, 23,

        0, 5, 12,    12, 5, 17,
        5, 7, 17,    17, 7, 19,
        6, 18, 7,    18, 19, 7,
        6, 8, 18,    18, 8, 20,
        8, 9, 20,    20, 9, 21,
        9, 11, 21,   21, 11, 23,
        10, 22, 11,  22, 23, 11,
        10, 3, 22,   22, 3, 15,
        2, 14, 3,    14, 15, 3,
        0, 12, 2,    12, 14, 2,
    ];

    expand(&positions, &indices)
}

/// De-indexes the solid so each quad carries its own flat color.
fn expand(positions: &[[f32; 3]; 24], indices: &[u16; 96]) -> Vec<ColoredVertex3> {
    indices
        .iter()
        .enumerate()
        .map(|(i, &ndx)| {
            let [r, g, b] = QUAD_COLORS[i / 6];
            ColoredVertex3 {
                position: positions[usize::from(ndx)],
                color: [r, g, b, 255],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_z(tri: &[ColoredVertex3]) -> f32 {
        let [a, b, c] = [tri[0].position, tri[1].position, tri[2].position];
        let e1 = [b[0] - a[0], b[1] - a[1]];
        let e2 = [c[0] - a[0], c[1] - a[1]];
        e1[0] * e2[1] - e1[1] * e2[0]
    }

    #[test]
    fn flat_f_indices_stay_in_range() {
        let f = f_2d();
        assert_eq!(f.vertices.len(), 12);
        assert_eq!(f.indices.len(), 18);
        assert!(f.indices.iter().all(|&i| (i as usize) < f.vertices.len()));
    }

    #[test]
    fn solid_f_has_sixteen_flat_colored_quads() {
        let verts = f_3d();
        assert_eq!(verts.len(), 96);
        for quad in verts.chunks(6) {
            assert!(quad.iter().all(|v| v.color == quad[0].color));
            assert_eq!(quad[0].color[3], 255);
        }
        assert_eq!(verts[0].color, [200, 70, 120, 255]);
        assert_eq!(verts[95].color, [140, 210, 80, 255]);
    }

    #[test]
    fn front_and_back_faces_wind_oppositely() {
        for verts in [f_3d(), f_3d_centered()] {
            let front = normal_z(&verts[..3]);
            let back = normal_z(&verts[18..21]);
            assert!(front > 0.0);
            assert!(back < 0.0);
        }
    }

    #[test]
    fn centered_f_is_centered() {
        let verts = f_3d_centered();
        let (min, max) = verts.iter().fold(
            ([f32::MAX; 3], [f32::MIN; 3]),
            |(mut lo, mut hi), v| {
                for k in 0..3 {
                    lo[k] = lo[k].min(v.position[k]);
                    hi[k] = hi[k].max(v.position[k]);
                }
                (lo, hi)
            },
        );
        assert_eq!(min, [-50.0, -75.0, -15.0]);
        assert_eq!(max, [50.0, 75.0, 15.0]);
    }
}
