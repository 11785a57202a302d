//! Forward-Mode Automatic Differentiation

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Point3f, Vector3f};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A first-order dual number carrying a value and its partial derivatives
/// with respect to the three spatial coordinates. Evaluating a signed
/// distance function on `Dual` inputs yields the distance and its gradient
/// in one pass, which gives the surface normal at a ray-marched hit.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dual {
    /// The value.
    pub v: Float,

    /// Partial derivative with respect to x.
    pub dx: Float,

    /// Partial derivative with respect to y.
    pub dy: Float,

    /// Partial derivative with respect to z.
    pub dz: Float,
}

impl Dual {
    /// Creates a constant with zero derivatives.
    ///
    /// * `v` - The value.
    pub fn constant(v: Float) -> Self {
        Self {
            v,
            dx: 0.0,
            dy: 0.0,
            dz: 0.0,
        }
    }

    /// Creates a dual number with explicit derivatives.
    pub fn new(v: Float, dx: Float, dy: Float, dz: Float) -> Self {
        Self { v, dx, dy, dz }
    }

    /// Applies the chain rule for a univariate function with known derivative.
    ///
    /// * `value`      - The function value.
    /// * `derivative` - The function derivative at `self.v`.
    fn chain(&self, value: Float, derivative: Float) -> Self {
        Self {
            v: value,
            dx: self.dx * derivative,
            dy: self.dy * derivative,
            dz: self.dz * derivative,
        }
    }

    /// Square root.
    pub fn sqrt(&self) -> Self {
        let root = self.v.max(0.0).sqrt();
        // The derivative blows up at zero; a tiny floor keeps marching stable.
        self.chain(root, 0.5 / max(root, 1e-8))
    }

    /// Absolute value. The derivative at zero is taken from the positive side.
    pub fn abs(&self) -> Self {
        if self.v < 0.0 {
            -*self
        } else {
            *self
        }
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Self {
        self.chain(self.v.ln(), 1.0 / self.v)
    }

    /// Raises to a constant power.
    ///
    /// * `exponent` - The exponent.
    pub fn powf(&self, exponent: Float) -> Self {
        self.chain(
            self.v.powf(exponent),
            exponent * self.v.powf(exponent - 1.0),
        )
    }

    /// Sine.
    pub fn sin(&self) -> Self {
        self.chain(self.v.sin(), self.v.cos())
    }

    /// Cosine.
    pub fn cos(&self) -> Self {
        self.chain(self.v.cos(), -self.v.sin())
    }

    /// Arc cosine.
    pub fn acos(&self) -> Self {
        let clamped = clamp(self.v, -1.0, 1.0);
        self.chain(clamped.acos(), -1.0 / safe_sqrt(1.0 - clamped * clamped).max(1e-8))
    }

    /// Two-argument arc tangent `atan2(self, x)`.
    ///
    /// * `x` - The second argument.
    pub fn atan2(&self, x: Dual) -> Self {
        let y = *self;
        let denom = max(y.v * y.v + x.v * x.v, 1e-12);
        Self {
            v: y.v.atan2(x.v),
            dx: (x.v * y.dx - y.v * x.dx) / denom,
            dy: (x.v * y.dy - y.v * x.dy) / denom,
            dz: (x.v * y.dz - y.v * x.dz) / denom,
        }
    }

    /// Returns the smaller of two dual numbers by value.
    ///
    /// * `other` - The other dual number.
    pub fn min(&self, other: Dual) -> Self {
        if self.v <= other.v {
            *self
        } else {
            other
        }
    }

    /// Returns the larger of two dual numbers by value.
    ///
    /// * `other` - The other dual number.
    pub fn max(&self, other: Dual) -> Self {
        if self.v >= other.v {
            *self
        } else {
            other
        }
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(self.v + o.v, self.dx + o.dx, self.dy + o.dy, self.dz + o.dz)
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        Self::new(self.v - o.v, self.dx - o.dx, self.dy - o.dy, self.dz - o.dz)
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, o: Self) -> Self {
        Self::new(
            self.v * o.v,
            self.dx * o.v + self.v * o.dx,
            self.dy * o.v + self.v * o.dy,
            self.dz * o.v + self.v * o.dz,
        )
    }
}

impl Mul<Float> for Dual {
    type Output = Self;

    fn mul(self, s: Float) -> Self {
        Self::new(self.v * s, self.dx * s, self.dy * s, self.dz * s)
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, o: Self) -> Self {
        let inv = 1.0 / o.v;
        let inv2 = inv * inv;
        Self::new(
            self.v * inv,
            (self.dx * o.v - self.v * o.dx) * inv2,
            (self.dy * o.v - self.v * o.dy) * inv2,
            (self.dz * o.v - self.v * o.dz) * inv2,
        )
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.v, -self.dx, -self.dy, -self.dz)
    }
}

impl Sub<Float> for Dual {
    type Output = Self;

    fn sub(self, s: Float) -> Self {
        Self::new(self.v - s, self.dx, self.dy, self.dz)
    }
}

impl Add<Float> for Dual {
    type Output = Self;

    fn add(self, s: Float) -> Self {
        Self::new(self.v + s, self.dx, self.dy, self.dz)
    }
}

/// A 3-component vector of dual numbers.
#[derive(Copy, Clone, Debug, Default)]
pub struct DualVector {
    /// X-coordinate.
    pub x: Dual,

    /// Y-coordinate.
    pub y: Dual,

    /// Z-coordinate.
    pub z: Dual,
}

impl DualVector {
    /// Creates a new dual vector.
    pub fn new(x: Dual, y: Dual, z: Dual) -> Self {
        Self { x, y, z }
    }

    /// Lifts a point to a dual vector whose derivatives track the point's
    /// coordinates (the "variable" seed for gradient evaluation).
    ///
    /// * `p` - The point.
    pub fn variable(p: Point3f) -> Self {
        Self {
            x: Dual::new(p.x, 1.0, 0.0, 0.0),
            y: Dual::new(p.y, 0.0, 1.0, 0.0),
            z: Dual::new(p.z, 0.0, 0.0, 1.0),
        }
    }

    /// Lifts a point to a dual vector with zero derivatives (for plain
    /// distance evaluation).
    ///
    /// * `p` - The point.
    pub fn constant(p: Point3f) -> Self {
        Self {
            x: Dual::constant(p.x),
            y: Dual::constant(p.y),
            z: Dual::constant(p.z),
        }
    }

    /// Returns the plain value of the vector.
    pub fn value(&self) -> Vector3f {
        Vector3f::new(self.x.v, self.y.v, self.z.v)
    }

    /// Returns the squared length.
    pub fn length_squared(&self) -> Dual {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the length.
    pub fn length(&self) -> Dual {
        self.length_squared().sqrt()
    }
}

impl Add for DualVector {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for DualVector {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Sub<Vector3f> for DualVector {
    type Output = Self;

    fn sub(self, v: Vector3f) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<Dual> for DualVector {
    type Output = Self;

    fn mul(self, s: Dual) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Float> for DualVector {
    type Output = Self;

    fn mul(self, s: Float) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_rule() {
        let x = Dual::new(3.0, 1.0, 0.0, 0.0);
        let square = x * x;
        assert_eq!(square.v, 9.0);
        assert_eq!(square.dx, 6.0);
    }

    #[test]
    fn sphere_distance_gradient_is_radial() {
        // d(p) = |p| - 1; the gradient is the outward unit direction.
        let p = DualVector::variable(Point3f::new(0.0, 2.0, 0.0));
        let d = p.length() - 1.0;
        assert!((d.v - 1.0).abs() < 1e-5);
        assert!(d.dx.abs() < 1e-5);
        assert!((d.dy - 1.0).abs() < 1e-5);
        assert!(d.dz.abs() < 1e-5);
    }

    #[test]
    fn quotient_rule() {
        let x = Dual::new(2.0, 1.0, 0.0, 0.0);
        let y = Dual::constant(4.0);
        let q = x / y;
        assert_eq!(q.v, 0.5);
        assert_eq!(q.dx, 0.25);
    }
}
