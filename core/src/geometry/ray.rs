//! Rays

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Point3f, Vector3f};

/// A ray with origin and direction. The direction is not required to be of
/// unit length; its transformed length carries scale information through
/// instance transforms (a parametric distance in one space can then be mapped
/// to the other by the direction's length).
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin of the ray.
    pub origin: Point3f,

    /// Direction of the ray.
    pub direction: Vector3f,

    /// Number of bounces this ray has taken, used as a termination hint and
    /// for self-intersection offsets.
    pub depth: u32,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// * `origin`    - Origin of the ray.
    /// * `direction` - Direction of the ray.
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self {
            origin,
            direction,
            depth: 0,
        }
    }

    /// Creates a new ray with a given depth.
    ///
    /// * `origin`    - Origin of the ray.
    /// * `direction` - Direction of the ray.
    /// * `depth`     - Number of bounces taken so far.
    pub fn with_depth(origin: Point3f, direction: Vector3f, depth: u32) -> Self {
        Self {
            origin,
            direction,
            depth,
        }
    }

    /// Returns the point at parametric distance `t` along the ray.
    ///
    /// * `t` - The parametric distance.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.direction * t
    }

    /// Returns the same ray with a unit length direction.
    pub fn normalized(&self) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.normalize(),
            depth: self.depth,
        }
    }
}
