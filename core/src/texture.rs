//! Texture Interface

#![allow(dead_code)]

use crate::color::Color;
use crate::common::Float;
use crate::geometry::Point2f;
use std::sync::Arc;

/// Maps texture coordinates to colors.
pub trait Texture: Send + Sync {
    /// Evaluates the texture at the given coordinates.
    ///
    /// * `uv` - The texture coordinates.
    fn evaluate(&self, uv: Point2f) -> Color;

    /// Evaluates the texture as a scalar value. The default implementation
    /// averages the color channels.
    ///
    /// * `uv` - The texture coordinates.
    fn scalar(&self, uv: Point2f) -> Float {
        self.evaluate(uv).mean()
    }
}

/// Atomic reference counted `Texture`.
pub type ArcTexture = Arc<dyn Texture>;
