use super::MipLevel;

/// Creates one `Rgba8Unorm` texture holding every level of `levels`.
///
/// The base level sets the size and the level count. Each level is written
/// with its own `write_texture` call.
pub fn create_texture_with_mips(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    levels: &[MipLevel],
    label: &str,
) -> anyhow::Result<wgpu::Texture> {
    let base = levels
        .first()
        .ok_or_else(|| anyhow::anyhow!("texture {label:?} has no mip levels"))?;

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: base.width,
            height: base.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len() as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (mip_level, level) in levels.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: mip_level as u32,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &level.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(level.width * 4),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width: level.width,
                height: level.height,
                depth_or_array_layers: 1,
            },
        );
    }

    log::debug!(
        "uploaded texture {label:?}: {}x{}, {} levels",
        base.width,
        base.height,
        levels.len()
    );

    Ok(texture)
}
