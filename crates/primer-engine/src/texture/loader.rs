use std::path::Path;

use anyhow::{Context, Result};

use super::MipLevel;

/// Decodes an image file into a single RGBA8 level.
///
/// With `flip_y` the rows are reversed so the first row of the file lands at
/// texture coordinate `v = 1`.
pub fn load_image(path: &Path, flip_y: bool) -> Result<MipLevel> {
    let mut rgba = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?
        .to_rgba8();

    if flip_y {
        image::imageops::flip_vertical_in_place(&mut rgba);
    }

    let (width, height) = rgba.dimensions();
    log::info!("loaded {} ({width}x{height})", path.display());
    Ok(MipLevel::new(rgba.into_raw(), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_image(Path::new("/nonexistent/f-texture.png"), true).unwrap_err();
        assert!(format!("{err:#}").contains("f-texture.png"));
    }

    #[test]
    fn flip_reverses_rows() {
        let dir = std::env::temp_dir().join(format!("primer-image-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("two-rows.png");

        let img = image::RgbaImage::from_fn(1, 2, |_, y| {
            if y == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        img.save(&path).unwrap();

        let upright = load_image(&path, false).unwrap();
        let flipped = load_image(&path, true).unwrap();
        assert_eq!(&upright.data[..4], &[255, 0, 0, 255]);
        assert_eq!(&flipped.data[..4], &[0, 0, 255, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
