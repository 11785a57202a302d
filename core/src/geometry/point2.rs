//! 2-D Points

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::Vector2f;
use std::ops::{Add, Index, Mul, Sub};

/// A 2-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,
}

impl Point2f {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Creates the origin point.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Add<Vector2f> for Point2f {
    type Output = Self;

    fn add(self, v: Vector2f) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub for Point2f {
    type Output = Vector2f;

    fn sub(self, other: Self) -> Vector2f {
        Vector2f::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<Float> for Point2f {
    type Output = Self;

    fn mul(self, s: Float) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Index<usize> for Point2f {
    type Output = Float;

    fn index(&self, axis: usize) -> &Float {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis for Point2f::index"),
        }
    }
}

/// A 2-D point containing `i32` values, used for pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2i {
    /// X-coordinate.
    pub x: i32,

    /// Y-coordinate.
    pub y: i32,
}

impl Point2i {
    /// Creates a new 2-D integer point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates the origin point.
    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

impl Add for Point2i {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}
