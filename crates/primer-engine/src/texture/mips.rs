/// One RGBA8 mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl MipLevel {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self { data, width, height }
    }

    /// Texel at `(x, y)`, clamped to the level's edges.
    fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let offset = ((y * self.width + x) * 4) as usize;
        let px = &self.data[offset..offset + 4];
        [px[0].into(), px[1].into(), px[2].into(), px[3].into()]
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| lerp(a[i], b[i], t))
}

/// Blends a 2x2 neighborhood: `t1` across, `t2` down.
pub fn bilinear_filter(
    tl: [f32; 4],
    tr: [f32; 4],
    bl: [f32; 4],
    br: [f32; 4],
    t1: f32,
    t2: f32,
) -> [f32; 4] {
    let top = mix(tl, tr, t1);
    let bottom = mix(bl, br, t1);
    mix(top, bottom, t2)
}

/// Halves `src` (each side floored, min 1) with a bilinear box filter.
///
/// Every destination texel samples the source at its own texel center.
/// Neighbors past the last row or column repeat the edge texel.
pub fn next_mip_level(src: &MipLevel) -> MipLevel {
    let dst_width = (src.width / 2).max(1);
    let dst_height = (src.height / 2).max(1);
    let mut dst = Vec::with_capacity((dst_width * dst_height * 4) as usize);

    for y in 0..dst_height {
        for x in 0..dst_width {
            let u = (x as f32 + 0.5) / dst_width as f32;
            let v = (y as f32 + 0.5) / dst_height as f32;

            let au = u * src.width as f32 - 0.5;
            let av = v * src.height as f32 - 0.5;

            // Truncation toward zero, remainder keeps the sign.
            let tx = au.trunc().max(0.0) as u32;
            let ty = av.trunc().max(0.0) as u32;
            let t1 = au % 1.0;
            let t2 = av % 1.0;

            let px = bilinear_filter(
                src.texel(tx, ty),
                src.texel(tx + 1, ty),
                src.texel(tx, ty + 1),
                src.texel(tx + 1, ty + 1),
                t1,
                t2,
            );
            dst.extend(px.iter().map(|&c| c.clamp(0.0, 255.0) as u8));
        }
    }

    MipLevel::new(dst, dst_width, dst_height)
}

/// Builds the full chain down to 1x1, base level first.
///
/// The height is derived from the data length (`len / 4 / width`).
pub fn generate_mips(data: Vec<u8>, width: u32) -> Vec<MipLevel> {
    let height = if width == 0 {
        0
    } else {
        (data.len() / 4 / width as usize) as u32
    };
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut mips = vec![MipLevel::new(data, width, height)];
    loop {
        let Some(last) = mips.last() else { break };
        if last.width <= 1 && last.height <= 1 {
            break;
        }
        let next = next_mip_level(last);
        mips.push(next);
    }
    mips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> MipLevel {
        MipLevel::new(px.repeat((width * height) as usize), width, height)
    }

    #[test]
    fn bilinear_filter_blends_both_axes() {
        let black = [0.0; 4];
        let white = [255.0; 4];
        assert_eq!(bilinear_filter(black, white, black, white, 0.5, 0.0), [127.5; 4]);
        assert_eq!(bilinear_filter(black, black, white, white, 0.0, 0.25), [63.75; 4]);
    }

    #[test]
    fn next_level_floors_dimensions() {
        let next = next_mip_level(&solid(5, 3, [1, 2, 3, 4]));
        assert_eq!((next.width, next.height), (2, 1));

        let tall = next_mip_level(&solid(1, 8, [0; 4]));
        assert_eq!((tall.width, tall.height), (1, 4));
    }

    #[test]
    fn solid_color_survives_downsampling() {
        let next = next_mip_level(&solid(4, 4, [10, 20, 30, 255]));
        assert_eq!(next.data, [10, 20, 30, 255].repeat(4));
    }

    #[test]
    fn even_sizes_average_two_by_two_blocks() {
        // Columns alternate black and white; each destination texel sits
        // halfway between a pair.
        let row = [[0, 0, 0, 255], [255, 255, 255, 255]].concat().repeat(2);
        let src = MipLevel::new(row.repeat(2), 4, 2);
        let next = next_mip_level(&src);
        assert_eq!((next.width, next.height), (2, 1));
        assert_eq!(&next.data[..4], &[127, 127, 127, 255]);
    }

    #[test]
    fn single_column_clamps_to_edge() {
        let src = MipLevel::new([[0, 0, 0, 0], [200, 200, 200, 200]].concat(), 1, 2);
        let next = next_mip_level(&src);
        assert_eq!((next.width, next.height), (1, 1));
        assert_eq!(next.data, vec![100, 100, 100, 100]);
    }

    #[test]
    fn chain_ends_at_one_by_one() {
        let mips = generate_mips([255u8; 4].repeat(16 * 4), 16);
        let sizes: Vec<_> = mips.iter().map(|m| (m.width, m.height)).collect();
        assert_eq!(sizes, vec![(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn empty_input_has_no_levels() {
        assert!(generate_mips(Vec::new(), 4).is_empty());
        assert!(generate_mips(vec![0; 16], 0).is_empty());
    }
}
