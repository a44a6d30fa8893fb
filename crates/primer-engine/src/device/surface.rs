use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = caps.formats.first().copied()?;

    let preferred = caps.formats.iter().copied().find(|f| f.is_srgb() == prefer_srgb);
    Some(preferred.unwrap_or(first))
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Computes the drawable size for a window, the way a canvas follows its element.
///
/// The device pixel ratio is capped at `max_pixel_ratio`, and each dimension is
/// clamped to `[1, max_dimension]` so the surface never exceeds the device's
/// 2D texture limit.
pub fn surface_extent(
    logical: (f64, f64),
    scale_factor: f64,
    max_pixel_ratio: f64,
    max_dimension: u32,
) -> PhysicalSize<u32> {
    let dpr = scale_factor.min(max_pixel_ratio).max(f64::MIN_POSITIVE);
    let fit = |v: f64| -> u32 {
        let px = (v * dpr).floor();
        if !px.is_finite() || px < 1.0 {
            return 1;
        }
        (px.min(f64::from(max_dimension)) as u32).max(1)
    };
    PhysicalSize::new(fit(logical.0), fit(logical.1))
}

/// Records `requested` and reconfigures the surface when it is usable and new.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    requested: PhysicalSize<u32>,
) {
    *size = requested;
    let unchanged = (config.width, config.height) == (requested.width, requested.height);
    if requested.width == 0 || requested.height == 0 || unchanged {
        return;
    }
    config.width = requested.width;
    config.height = requested.height;
    surface.configure(device, config);
    log::debug!("surface reconfigured to {}x{}", requested.width, requested.height);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    use wgpu::SurfaceError::*;
    match err {
        Lost | Outdated if size.width == 0 || size.height == 0 => SurfaceErrorAction::SkipFrame,
        Lost | Outdated => {
            surface.configure(device, config);
            SurfaceErrorAction::Reconfigured
        }
        OutOfMemory => SurfaceErrorAction::Fatal,
        Timeout | Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_scales_by_pixel_ratio() {
        let size = surface_extent((400.0, 300.0), 1.5, 2.0, 8192);
        assert_eq!(size, PhysicalSize::new(600, 450));
    }

    #[test]
    fn extent_caps_pixel_ratio() {
        let size = surface_extent((400.0, 300.0), 3.0, 2.0, 8192);
        assert_eq!(size, PhysicalSize::new(800, 600));
    }

    #[test]
    fn extent_clamps_to_max_dimension() {
        let size = surface_extent((5000.0, 100.0), 2.0, 2.0, 8192);
        assert_eq!(size, PhysicalSize::new(8192, 200));
    }

    #[test]
    fn extent_never_collapses_to_zero() {
        let size = surface_extent((0.0, 0.2), 1.0, 2.0, 8192);
        assert_eq!(size, PhysicalSize::new(1, 1));
    }
}
