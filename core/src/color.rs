//! RGB Colors

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::Vector3f;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub};

/// A linear RGB tristimulus value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: Float,

    /// Green component.
    pub g: Float,

    /// Blue component.
    pub b: Float,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// White.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Creates a new color from components.
    ///
    /// * `r` - Red component.
    /// * `g` - Green component.
    /// * `b` - Blue component.
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Creates a gray color with all components set to the same value.
    ///
    /// * `v` - The component value.
    pub fn gray(v: Float) -> Self {
        Self::new(v, v, v)
    }

    /// Returns true if all components are zero.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }

    /// Returns the largest component.
    pub fn max_component(&self) -> Float {
        max(self.r, max(self.g, self.b))
    }

    /// Returns the arithmetic mean of the components.
    pub fn mean(&self) -> Float {
        (self.r + self.g + self.b) / 3.0
    }

    /// Returns the luminance of the color.
    pub fn luminance(&self) -> Float {
        0.212671 * self.r + 0.715160 * self.g + 0.072169 * self.b
    }

    /// Returns the componentwise exponential.
    pub fn exp(&self) -> Self {
        Self::new(self.r.exp(), self.g.exp(), self.b.exp())
    }

    /// Clamps all components to the given range.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self::new(
            clamp(self.r, low, high),
            clamp(self.g, low, high),
            clamp(self.b, low, high),
        )
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul for Color {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for Color {
    type Output = Self;

    fn mul(self, s: Float) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

impl Mul<Color> for Float {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl MulAssign<Float> for Color {
    fn mul_assign(&mut self, s: Float) {
        *self = *self * s;
    }
}

impl Div<Float> for Color {
    type Output = Self;

    fn div(self, s: Float) -> Self {
        let inv = 1.0 / s;
        Self::new(self.r * inv, self.g * inv, self.b * inv)
    }
}

impl DivAssign<Float> for Color {
    fn div_assign(&mut self, s: Float) {
        *self = *self / s;
    }
}

impl From<Vector3f> for Color {
    fn from(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_is_black() {
        assert!(Color::BLACK.is_black());
        assert!(!Color::gray(0.1).is_black());
    }

    #[test]
    fn mean_and_max() {
        let c = Color::new(0.2, 0.4, 0.9);
        assert!((c.mean() - 0.5).abs() < 1e-6);
        assert_eq!(c.max_component(), 0.9);
    }
}
