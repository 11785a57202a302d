//! 3-D Axis-Aligned Bounding Boxes

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Point3f, Ray, Vector3f};

/// An axis-aligned bounding box. A default constructed box is empty; `full()`
/// creates an unbounded box spanning all of space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// The corner with minimal coordinates.
    pub p_min: Point3f,

    /// The corner with maximal coordinates.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty bounding box.
    fn default() -> Self {
        Self {
            p_min: Point3f::splat(INFINITY),
            p_max: Point3f::splat(-INFINITY),
        }
    }
}

impl Bounds3f {
    /// Creates a bounding box from two corner points.
    ///
    /// * `p_min` - The corner with minimal coordinates.
    /// * `p_max` - The corner with maximal coordinates.
    pub fn new(p_min: Point3f, p_max: Point3f) -> Self {
        Self { p_min, p_max }
    }

    /// Returns an empty bounding box.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a bounding box spanning all of space.
    pub fn full() -> Self {
        Self {
            p_min: Point3f::splat(-INFINITY),
            p_max: Point3f::splat(INFINITY),
        }
    }

    /// Returns true if the box spans an infinite extent on any axis.
    pub fn is_unbounded(&self) -> bool {
        self.p_min.x.is_infinite()
            || self.p_min.y.is_infinite()
            || self.p_min.z.is_infinite()
            || self.p_max.x.is_infinite()
            || self.p_max.y.is_infinite()
            || self.p_max.z.is_infinite()
    }

    /// Grows the box to include a point.
    ///
    /// * `p` - The point to include.
    pub fn extend(&mut self, p: Point3f) {
        self.p_min = self.p_min.min(&p);
        self.p_max = self.p_max.max(&p);
    }

    /// Grows the box to include another box.
    ///
    /// * `other` - The box to include.
    pub fn extend_bounds(&mut self, other: &Bounds3f) {
        self.p_min = self.p_min.min(&other.p_min);
        self.p_max = self.p_max.max(&other.p_max);
    }

    /// Returns true if the point lies inside the box (inclusive).
    ///
    /// * `p` - The point to test.
    pub fn includes(&self, p: Point3f) -> bool {
        self.p_min.x <= p.x
            && p.x <= self.p_max.x
            && self.p_min.y <= p.y
            && p.y <= self.p_max.y
            && self.p_min.z <= p.z
            && p.z <= self.p_max.z
    }

    /// Returns the diagonal vector from the minimal to the maximal corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the centre of the box.
    pub fn centroid(&self) -> Point3f {
        Point3f::new(
            0.5 * (self.p_min.x + self.p_max.x),
            0.5 * (self.p_min.y + self.p_max.y),
            0.5 * (self.p_min.z + self.p_max.z),
        )
    }

    /// Returns the axis along which the box has its largest extent.
    pub fn max_extent_axis(&self) -> usize {
        self.diagonal().max_axis()
    }

    /// Returns the corner point selected by a 3-bit index, where bit `d` picks
    /// the maximal coordinate along dimension `d`.
    ///
    /// * `corner` - Corner index in `0..8`.
    pub fn corner(&self, corner: usize) -> Point3f {
        Point3f::new(
            if corner & 1 != 0 { self.p_max.x } else { self.p_min.x },
            if corner & 2 != 0 { self.p_max.y } else { self.p_min.y },
            if corner & 4 != 0 { self.p_max.z } else { self.p_min.z },
        )
    }

    /// Intersects a ray with the box using the slab test. Returns the
    /// parametric distance of the entry hit, or `INFINITY` if the box is
    /// missed or lies entirely behind the ray origin.
    ///
    /// * `ray` - The ray to intersect.
    pub fn intersect(&self, ray: &Ray) -> Float {
        let inv_x = 1.0 / ray.direction.x;
        let inv_y = 1.0 / ray.direction.y;
        let inv_z = 1.0 / ray.direction.z;

        let t1 = Vector3f::new(
            (self.p_min.x - ray.origin.x) * inv_x,
            (self.p_min.y - ray.origin.y) * inv_y,
            (self.p_min.z - ray.origin.z) * inv_z,
        );
        let t2 = Vector3f::new(
            (self.p_max.x - ray.origin.x) * inv_x,
            (self.p_max.y - ray.origin.y) * inv_y,
            (self.p_max.z - ray.origin.z) * inv_z,
        );

        let t_near = t1.min(&t2).max_component();
        let t_far = t1.max(&t2).min_component();

        if t_far < t_near || t_far < EPSILON {
            INFINITY
        } else {
            t_near
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_from_empty() {
        let mut b = Bounds3f::empty();
        b.extend(Point3f::new(1.0, 2.0, 3.0));
        b.extend(Point3f::new(-1.0, 0.0, 5.0));
        assert_eq!(b.p_min, Point3f::new(-1.0, 0.0, 3.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn slab_hit_from_outside() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!((b.intersect(&ray) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn slab_miss() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3f::new(0.0, 5.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(b.intersect(&ray), INFINITY);
    }

    #[test]
    fn slab_box_behind_origin() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(b.intersect(&ray), INFINITY);
    }

    #[test]
    fn slab_from_inside_returns_negative_entry() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let t = b.intersect(&ray);
        assert!(t < 0.0 && t.is_finite());
    }
}
