//! Textures

mod checkerboard;
mod constant;
mod image_texture;

// Re-export.
pub use checkerboard::*;
pub use constant::*;
pub use image_texture::*;

use lumo_core::properties::Properties;
use lumo_core::texture::ArcTexture;
use std::sync::Arc;

/// Creates a texture from a variant name and its properties.
///
/// * `variant` - The texture variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcTexture, String> {
    match variant {
        "constant" => Ok(Arc::new(ConstantTexture::new(props)?)),
        "checkerboard" => Ok(Arc::new(CheckerboardTexture::new(props)?)),
        "image" => Ok(Arc::new(ImageTexture::new(props)?)),
        _ => Err(format!("unknown texture variant '{variant}'")),
    }
}
