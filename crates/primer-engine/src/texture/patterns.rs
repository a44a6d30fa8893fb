use super::mips::{generate_mips, MipLevel};

const W: [u8; 4] = [255, 255, 255, 255];
const R: [u8; 4] = [255, 0, 0, 255];
const B: [u8; 4] = [0, 28, 116, 255];
const Y: [u8; 4] = [255, 231, 0, 255];
const G: [u8; 4] = [58, 181, 75, 255];
const A: [u8; 4] = [38, 123, 167, 255];

/// 16x16 pattern whose colors visibly blend as it is minified.
#[rustfmt::skip]
const BLENDED: [[[u8; 4]; 16]; 16] = [
    [W, R, R, R, R, R, R, A, A, R, R, R, R, R, R, W],
    [W, W, R, R, R, R, R, A, A, R, R, R, R, R, W, W],
    [W, W, W, R, R, R, R, A, A, R, R, R, R, W, W, W],
    [W, W, W, W, R, R, R, A, A, R, R, R, W, W, W, W],
    [W, W, W, W, W, R, R, A, A, R, R, W, W, W, W, W],
    [W, W, W, W, W, W, R, A, A, R, W, W, W, W, W, W],
    [W, W, W, W, W, W, W, A, A, W, W, W, W, W, W, W],
    [B, B, B, B, B, B, B, B, A, Y, Y, Y, Y, Y, Y, Y],
    [B, B, B, B, B, B, B, G, Y, Y, Y, Y, Y, Y, Y, Y],
    [W, W, W, W, W, W, W, G, G, W, W, W, W, W, W, W],
    [W, W, W, W, W, W, R, G, G, R, W, W, W, W, W, W],
    [W, W, W, W, W, R, R, G, G, R, R, W, W, W, W, W],
    [W, W, W, W, R, R, R, G, G, R, R, R, W, W, W, W],
    [W, W, W, R, R, R, R, G, G, R, R, R, R, W, W, W],
    [W, W, R, R, R, R, R, G, G, R, R, R, R, R, W, W],
    [W, R, R, R, R, R, R, G, G, R, R, R, R, R, R, W],
];

/// The 16x16 pattern and its generated mip chain.
pub fn blended_mipmap() -> Vec<MipLevel> {
    let data: Vec<u8> = BLENDED.iter().flatten().flatten().copied().collect();
    generate_mips(data, 16)
}

/// Level sizes and colors of the checked chain; every level has its own hue so
/// the sampled level is visible on screen.
const CHECKED_LEVELS: [(u32, [u8; 3]); 7] = [
    (64, [128, 0, 255]),
    (32, [0, 255, 0]),
    (16, [255, 0, 0]),
    (8, [255, 255, 0]),
    (4, [0, 0, 255]),
    (2, [0, 255, 255]),
    (1, [255, 0, 255]),
];

/// Seven hand-made levels (64 down to 1).
///
/// The top-left and bottom-right quadrants carry the level color; the other
/// two are white on even levels and black on odd ones. A 1x1 level has no
/// quadrants and is the plain level color.
pub fn checked_mipmap() -> Vec<MipLevel> {
    CHECKED_LEVELS
        .iter()
        .enumerate()
        .map(|(i, &(size, [r, g, b]))| {
            let color = [r, g, b, 255];
            let background = if i & 1 == 1 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            };

            if size == 1 {
                return MipLevel::new(color.to_vec(), 1, 1);
            }

            let half = size / 2;
            let mut data = Vec::with_capacity((size * size * 4) as usize);
            for y in 0..size {
                for x in 0..size {
                    let colored = (x < half) == (y < half);
                    data.extend_from_slice(if colored { &color } else { &background });
                }
            }
            MipLevel::new(data, size, size)
        })
        .collect()
}

const F_SIZE: u32 = 64;
const F_BACKGROUND: [u8; 4] = [255, 220, 160, 255];
const F_INK: [u8; 4] = [40, 60, 140, 255];

/// Strokes of the "F" as `[x0, y0, x1, y1)` rectangles in texels.
const F_STROKES: [[u32; 4]; 3] = [
    [16, 8, 28, 56],  // column
    [28, 8, 48, 20],  // top rung
    [28, 28, 42, 40], // middle rung
];

/// A 64x64 "F" on a warm background, top row first.
///
/// Stands in for an image file; the glyph is asymmetric on both axes, so a
/// missing or doubled vertical flip is obvious.
pub fn f_texture() -> MipLevel {
    let mut data = Vec::with_capacity((F_SIZE * F_SIZE * 4) as usize);
    for y in 0..F_SIZE {
        for x in 0..F_SIZE {
            let inked = F_STROKES
                .iter()
                .any(|&[x0, y0, x1, y1]| (x0..x1).contains(&x) && (y0..y1).contains(&y));
            data.extend_from_slice(if inked { &F_INK } else { &F_BACKGROUND });
        }
    }
    MipLevel::new(data, F_SIZE, F_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(level: &MipLevel, x: u32, y: u32) -> [u8; 4] {
        let o = ((y * level.width + x) * 4) as usize;
        [level.data[o], level.data[o + 1], level.data[o + 2], level.data[o + 3]]
    }

    #[test]
    fn blended_chain_has_five_levels() {
        let mips = blended_mipmap();
        assert_eq!(mips.len(), 5);
        assert_eq!(texel(&mips[0], 0, 0), W);
        assert_eq!(texel(&mips[0], 7, 0), A);
        assert_eq!((mips[4].width, mips[4].height), (1, 1));
    }

    #[test]
    fn blended_base_level_mixes_between_texels() {
        let mips = blended_mipmap();
        // Averages the W/R pairs of rows 0 and 1.
        let px = texel(&mips[1], 0, 0);
        assert_eq!(px[0], 255);
        assert!(px[1] > 0 && px[1] < 255);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn checked_levels_alternate_background() {
        let mips = checked_mipmap();
        let sizes: Vec<_> = mips.iter().map(|m| m.width).collect();
        assert_eq!(sizes, vec![64, 32, 16, 8, 4, 2, 1]);

        assert_eq!(texel(&mips[0], 0, 0), [128, 0, 255, 255]);
        assert_eq!(texel(&mips[0], 63, 63), [128, 0, 255, 255]);
        assert_eq!(texel(&mips[0], 63, 0), [255, 255, 255, 255]);
        assert_eq!(texel(&mips[1], 31, 0), [0, 0, 0, 255]);
        assert_eq!(texel(&mips[5], 1, 0), [0, 0, 0, 255]);
        assert_eq!(texel(&mips[4], 3, 0), [255, 255, 255, 255]);
        assert_eq!(mips[6].data, vec![255, 0, 255, 255]);
    }

    #[test]
    fn f_texture_is_asymmetric() {
        let f = f_texture();
        assert_eq!(f.data.len(), 64 * 64 * 4);
        assert_eq!(texel(&f, 20, 10), F_INK);
        assert_eq!(texel(&f, 45, 10), F_INK);
        assert_eq!(texel(&f, 45, 50), F_BACKGROUND);
        assert_eq!(texel(&f, 0, 0), F_BACKGROUND);
    }
}
