//! Shape Interface

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Bounds3f, Point3f, Ray};
use crate::interaction::{AreaSample, Intersection};
use crate::sampler::Sampler;
use std::sync::Arc;

/// A geometrical object that can be intersected by rays.
pub trait Shape: Send + Sync {
    /// Tests the shape for intersection with a ray, and on success updates
    /// the provided intersection. An implementation may only strengthen the
    /// intersection: candidates farther away than the current `its.t` are
    /// dismissed.
    ///
    /// * `ray` - The ray to intersect.
    /// * `its` - The intersection to update.
    /// * `rng` - The sampler driving stochastic intersection decisions.
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool;

    /// Returns a bounding box that tightly encapsulates the shape.
    fn bounds(&self) -> Bounds3f;

    /// Returns the center of the shape. The exact definition is not
    /// important as long as the point lies within the bounding box and can
    /// be used to partition objects.
    fn centroid(&self) -> Point3f;

    /// Samples a random point on the surface of this shape.
    ///
    /// * `rng` - The sampler driving the sampling decisions.
    fn sample_area(&self, rng: &mut dyn Sampler) -> AreaSample {
        let _ = rng;
        unimplemented!("area sampling is not supported by this shape")
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;

/// Intersects a bounding box and reports whether a closer hit than the
/// current best may lie inside it.
///
/// * `bounds` - The bounding box.
/// * `ray`    - The ray to test.
/// * `best_t` - The current best intersection distance.
pub fn bounds_may_contain_closer_hit(bounds: &Bounds3f, ray: &Ray, best_t: Float) -> bool {
    bounds.intersect(ray) < best_t
}
