//! Instance Groups

#![allow(dead_code)]

use crate::bvh::{Bvh, PrimitiveSet};
use lumo_core::geometry::{Bounds3f, Point3f, Ray};
use lumo_core::instance::ArcInstance;
use lumo_core::interaction::Intersection;
use lumo_core::sampler::Sampler;
use lumo_core::shape::Shape;
use std::sync::Arc;

/// The scene-level aggregate: a flat collection of instances behind a BVH.
/// Instances with unbounded extent cannot be partitioned spatially and are
/// tested linearly instead.
pub struct Group {
    /// All instances of the scene.
    instances: Vec<ArcInstance>,

    /// Indices of instances with finite bounds, in BVH item order.
    bounded: Vec<u32>,

    /// Indices of instances with unbounded extent.
    unbounded: Vec<u32>,

    /// The hierarchy over the bounded instances.
    bvh: Bvh,
}

impl Group {
    /// Create a new `Group` over a collection of instances.
    ///
    /// * `instances` - The instances forming the scene geometry.
    pub fn new(instances: Vec<ArcInstance>) -> Arc<Self> {
        let mut bounded = Vec::new();
        let mut unbounded = Vec::new();
        for (i, instance) in instances.iter().enumerate() {
            if instance.bounds().is_unbounded() {
                unbounded.push(i as u32);
            } else {
                bounded.push(i as u32);
            }
        }

        if !unbounded.is_empty() {
            info!(
                "{} of {} instances are unbounded and bypass the BVH",
                unbounded.len(),
                instances.len()
            );
        }

        let mut group = Self {
            instances,
            bounded,
            unbounded,
            bvh: Bvh::build(&EmptySet),
        };
        group.bvh = Bvh::build(&group);
        Arc::new(group)
    }

    /// Intersects one instance by scene index, attaching the instance
    /// reference on success.
    fn intersect_instance(
        &self,
        index: usize,
        ray: &Ray,
        its: &mut Intersection,
        rng: &mut dyn Sampler,
    ) -> bool {
        let instance = &self.instances[index];
        if instance.intersect(ray, its, rng) {
            its.instance = Some(Arc::clone(instance));
            true
        } else {
            false
        }
    }
}

/// A placeholder collection used while the group is being constructed.
struct EmptySet;

impl PrimitiveSet for EmptySet {
    fn primitive_count(&self) -> usize {
        0
    }
    fn primitive_bounds(&self, _index: usize) -> Bounds3f {
        Bounds3f::empty()
    }
    fn primitive_centroid(&self, _index: usize) -> Point3f {
        Point3f::zero()
    }
    fn intersect_primitive(
        &self,
        _index: usize,
        _ray: &Ray,
        _its: &mut Intersection,
        _rng: &mut dyn Sampler,
    ) -> bool {
        false
    }
}

impl PrimitiveSet for Group {
    fn primitive_count(&self) -> usize {
        self.bounded.len()
    }

    fn primitive_bounds(&self, index: usize) -> Bounds3f {
        self.instances[self.bounded[index] as usize].bounds()
    }

    fn primitive_centroid(&self, index: usize) -> Point3f {
        self.instances[self.bounded[index] as usize].centroid()
    }

    fn intersect_primitive(
        &self,
        index: usize,
        ray: &Ray,
        its: &mut Intersection,
        rng: &mut dyn Sampler,
    ) -> bool {
        self.intersect_instance(self.bounded[index] as usize, ray, its, rng)
    }
}

impl Shape for Group {
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        let mut hit = false;
        for &index in &self.unbounded {
            hit |= self.intersect_instance(index as usize, ray, its, rng);
        }
        hit |= self.bvh.intersect(self, ray, its, rng);
        hit
    }

    fn bounds(&self) -> Bounds3f {
        if !self.unbounded.is_empty() {
            return Bounds3f::full();
        }
        self.bvh.bounds()
    }

    fn centroid(&self) -> Point3f {
        self.bounds().centroid()
    }
}
