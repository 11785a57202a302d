//! Constant Texture

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::geometry::Point2f;
use lumo_core::properties::Properties;
use lumo_core::texture::Texture;

/// A texture returning the same color everywhere.
pub struct ConstantTexture {
    /// The color of the texture.
    value: Color,
}

impl ConstantTexture {
    /// Create a new `ConstantTexture`.
    ///
    /// * `props` - Construction properties (`value` color).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            value: props.require_color("value")?,
        })
    }

    /// Create a new `ConstantTexture` from a color.
    ///
    /// * `value` - The color of the texture.
    pub fn with_color(value: Color) -> Self {
        Self { value }
    }
}

impl Texture for ConstantTexture {
    fn evaluate(&self, _uv: Point2f) -> Color {
        self.value
    }
}
