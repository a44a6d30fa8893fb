//! CPU texture data: mip chains, procedural patterns and image loading, plus
//! the upload helper that turns a mip chain into one `Rgba8Unorm` texture.

mod loader;
mod mips;
mod patterns;
mod upload;

pub use loader::load_image;
pub use mips::{bilinear_filter, generate_mips, lerp, mix, next_mip_level, MipLevel};
pub use patterns::{blended_mipmap, checked_mipmap, f_texture};
pub use upload::create_texture_with_mips;
