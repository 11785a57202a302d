//! Rectangles

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Frame, Point2f, Point3f, Ray, Vector3f};
use lumo_core::interaction::{AreaSample, Intersection, SurfaceEvent};
use lumo_core::sampler::Sampler;
use lumo_core::shape::Shape;

/// A rectangle in the xy-plane, spanning from [-1,-1,0] to [+1,+1,0].
#[derive(Default)]
pub struct Rectangle;

impl Rectangle {
    /// Create a new `Rectangle`.
    pub fn new() -> Self {
        Self
    }

    /// Fills in the surface data for a point on the rectangle, shared
    /// between intersection and area sampling.
    ///
    /// * `surf`     - The surface event to populate.
    /// * `position` - The point in [-1,-1,0]..[+1,+1,0].
    fn populate(&self, surf: &mut SurfaceEvent, position: Point3f) {
        surf.position = position;

        // Map the position to [0,0]..[1,1] by discarding z and rescaling.
        surf.uv = Point2f::new((position.x + 1.0) / 2.0, (position.y + 1.0) / 2.0);

        surf.frame = Frame::from_axes(
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        );

        // Uniform area sampling, so the pdf is one over the surface area.
        surf.pdf = 1.0 / 4.0;
    }
}

impl Shape for Rectangle {
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        let _ = rng;

        // A ray travelling in the xy-plane reports no intersection; the edge
        // case of infinitely many intersections is ignored.
        if ray.direction.z == 0.0 {
            return false;
        }

        let t = -ray.origin.z / ray.direction.z;

        // Never report an intersection closer than the self-intersection
        // threshold, and keep any closer existing hit.
        if t < EPSILON || t > its.t {
            return false;
        }

        let position = ray.at(t);
        if position.x.abs() > 1.0 || position.y.abs() > 1.0 {
            return false;
        }

        its.t = t;
        self.populate(&mut its.surf, position);
        true
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(Point3f::new(-1.0, -1.0, 0.0), Point3f::new(1.0, 1.0, 0.0))
    }

    fn centroid(&self) -> Point3f {
        Point3f::zero()
    }

    fn sample_area(&self, rng: &mut dyn Sampler) -> AreaSample {
        let u = rng.next_2d();
        let position = Point3f::new(2.0 * u.x - 1.0, 2.0 * u.y - 1.0, 0.0);

        let mut sample = AreaSample {
            surf: SurfaceEvent::default(),
            area: 4.0,
        };
        self.populate(&mut sample.surf, position);
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;

    #[test]
    fn perpendicular_hit() {
        let ray = Ray::new(Point3f::new(0.25, -0.5, 2.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(Rectangle::new().intersect(&ray, &mut its, &mut rng));
        assert!((its.t - 2.0).abs() < 1e-5);
        assert!((its.surf.uv.x - 0.625).abs() < 1e-5);
        assert!((its.surf.uv.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn outside_domain_misses() {
        let ray = Ray::new(Point3f::new(1.5, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(!Rectangle::new().intersect(&ray, &mut its, &mut rng));
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(1.0, 0.0, 0.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(!Rectangle::new().intersect(&ray, &mut its, &mut rng));
    }

    #[test]
    fn area_sampling_covers_the_surface() {
        let mut rng = StreamSampler::new(7);
        for _ in 0..100 {
            let sample = Rectangle::new().sample_area(&mut rng);
            let p = sample.surf.position;
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0 && p.z == 0.0);
            assert_eq!(sample.surf.pdf, 0.25);
            assert_eq!(sample.area, 4.0);
        }
    }
}
