use glam::{Mat3, Mat4, Vec3, Vec4};

/// Maps pixel coordinates (top-left origin, +Y down) to clip space.
pub fn pixel_to_clip_2d(width: f32, height: f32) -> Mat3 {
    #[rustfmt::skip]
    let cols = [
        2.0 / width, 0.0, 0.0,
        0.0, -2.0 / height, 0.0,
        -1.0, 1.0, 1.0,
    ];
    Mat3::from_cols_array(&cols)
}

/// Lays out a `Mat3` the way WGSL stores a `mat3x3f` uniform: three columns,
/// each padded to 16 bytes.
pub fn mat3_uniform(m: Mat3) -> [f32; 12] {
    let mut out = [0.0; 12];
    for (i, col) in [m.x_axis, m.y_axis, m.z_axis].into_iter().enumerate() {
        out[i * 4..i * 4 + 3].copy_from_slice(&col.to_array());
    }
    out
}

/// Pixel-space orthographic projection: +Y down, `z` in `[-depth, depth]`
/// mapped to clip depth `[0, 1]`.
pub fn pixel_projection(width: f32, height: f32, depth: f32) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.5 / depth, 0.0),
        Vec4::new(-1.0, 1.0, 0.5, 1.0),
    )
}

/// Orthographic projection; `near` maps to depth 0, `far` to depth 1.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh(left, right, bottom, top, near, far)
}

/// Perspective projection with a vertical field of view in radians.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y, aspect, near, far)
}

/// View matrix for a camera at `eye` looking at `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Remainder with the sign of the divisor: always in `[0, a)` for `a > 0`.
pub fn euclidean_modulo(x: f32, a: f32) -> f32 {
    x - a * (x / a).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn pixel_corners_reach_clip_corners() {
        let m = pixel_to_clip_2d(800.0, 600.0);
        let tl = m.transform_point2(Vec2::ZERO);
        let br = m.transform_point2(Vec2::new(800.0, 600.0));
        assert!(approx(tl.x, -1.0) && approx(tl.y, 1.0));
        assert!(approx(br.x, 1.0) && approx(br.y, -1.0));
    }

    #[test]
    fn mat3_uniform_pads_columns() {
        let m = Mat3::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(
            mat3_uniform(m),
            [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0]
        );
    }

    #[test]
    fn pixel_projection_maps_depth_range() {
        let m = pixel_projection(400.0, 200.0, 400.0);
        let near = m.project_point3(Vec3::new(0.0, 0.0, -400.0));
        let far = m.project_point3(Vec3::new(400.0, 200.0, 400.0));
        assert!(approx(near.x, -1.0) && approx(near.y, 1.0) && approx(near.z, 0.0));
        assert!(approx(far.x, 1.0) && approx(far.y, -1.0) && approx(far.z, 1.0));
    }

    #[test]
    fn ortho_flips_y_for_pixel_space() {
        let m = ortho(0.0, 400.0, 200.0, 0.0, 400.0, -400.0);
        let p = m.project_point3(Vec3::new(0.0, 0.0, 0.0));
        assert!(approx(p.x, -1.0) && approx(p.y, 1.0) && approx(p.z, 0.5));
        let q = m.project_point3(Vec3::new(400.0, 200.0, 400.0));
        assert!(approx(q.x, 1.0) && approx(q.y, -1.0) && approx(q.z, 1.0));
    }

    #[test]
    fn perspective_near_plane_is_depth_zero() {
        let m = perspective(60f32.to_radians(), 1.5, 1.0, 2000.0);
        let p = m.project_point3(Vec3::new(0.0, 0.0, -1.0));
        assert!(approx(p.z, 0.0));
        let q = m.project_point3(Vec3::new(0.0, 0.0, -2000.0));
        assert!(approx(q.z, 1.0));
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = look_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_point3(Vec3::ZERO);
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, -2.0));
    }

    #[test]
    fn euclidean_modulo_wraps_negatives() {
        assert!(approx(euclidean_modulo(-0.5, 3.0), 2.5));
        assert!(approx(euclidean_modulo(3.5, 3.0), 0.5));
        assert!(approx(euclidean_modulo(1.0, 3.0), 1.0));
    }
}
