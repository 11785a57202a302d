//! Checkerboard Texture

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::geometry::{Point2f, Vector2f};
use lumo_core::properties::Properties;
use lumo_core::texture::Texture;

/// A procedural checkerboard alternating two colors on a scaled uv grid.
pub struct CheckerboardTexture {
    /// Color of the even cells.
    color0: Color,

    /// Color of the odd cells.
    color1: Color,

    /// Number of cells per unit of texture space.
    scale: Vector2f,
}

impl CheckerboardTexture {
    /// Create a new `CheckerboardTexture`.
    ///
    /// * `props` - Construction properties (`color0`, `color1`, `scale`).
    pub fn new(props: &Properties) -> Result<Self, String> {
        let scale = props.vector_or("scale", lumo_core::geometry::Vector3f::new(2.0, 2.0, 0.0));
        Ok(Self {
            color0: props.require_color("color0")?,
            color1: props.require_color("color1")?,
            scale: Vector2f::new(scale.x, scale.y),
        })
    }

    /// Create a new `CheckerboardTexture` from explicit values.
    pub fn with_colors(color0: Color, color1: Color, scale: Vector2f) -> Self {
        Self {
            color0,
            color1,
            scale,
        }
    }
}

impl Texture for CheckerboardTexture {
    fn evaluate(&self, uv: Point2f) -> Color {
        let cell_x = (uv.x * self.scale.x).floor() as i64;
        let cell_y = (uv.y * self.scale.y).floor() as i64;

        if (cell_x + cell_y).rem_euclid(2) == 0 {
            self.color0
        } else {
            self.color1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_between_cells() {
        let texture = CheckerboardTexture::with_colors(
            Color::BLACK,
            Color::WHITE,
            Vector2f::new(2.0, 2.0),
        );
        assert_eq!(texture.evaluate(Point2f::new(0.1, 0.1)), Color::BLACK);
        assert_eq!(texture.evaluate(Point2f::new(0.6, 0.1)), Color::WHITE);
        assert_eq!(texture.evaluate(Point2f::new(0.6, 0.6)), Color::BLACK);
    }

    #[test]
    fn negative_coordinates_continue_the_pattern() {
        let texture = CheckerboardTexture::with_colors(
            Color::BLACK,
            Color::WHITE,
            Vector2f::new(1.0, 1.0),
        );
        assert_eq!(texture.evaluate(Point2f::new(0.5, 0.5)), Color::BLACK);
        assert_eq!(texture.evaluate(Point2f::new(-0.5, 0.5)), Color::WHITE);
        assert_eq!(texture.evaluate(Point2f::new(-0.5, -0.5)), Color::BLACK);
    }
}
