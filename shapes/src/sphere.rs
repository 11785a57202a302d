//! Spheres

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Frame, Point2f, Point3f, Ray, Vector3f};
use lumo_core::interaction::{AreaSample, Intersection, SurfaceEvent};
use lumo_core::sampler::Sampler;
use lumo_core::sampling::square_to_uniform_sphere;
use lumo_core::shape::Shape;

/// A unit sphere centred at the origin. Size and placement come from the
/// instance transform.
#[derive(Default)]
pub struct Sphere;

/// Maps a point on the unit sphere to equirectangular texture coordinates
/// with the y-axis up.
fn sphere_uv(position: Point3f) -> Point2f {
    let r = Vector3f::from(position).length();
    let theta = (position.y / r).acos();
    let phi = position.z.atan2(position.x);
    Point2f::new(phi * INV_TWO_PI, (PI - theta) * INV_PI)
}

impl Sphere {
    /// Create a new `Sphere`.
    pub fn new() -> Self {
        Self
    }

    /// Fills in the surface data for a point on the sphere, shared between
    /// intersection and area sampling.
    ///
    /// * `surf`     - The surface event to populate.
    /// * `position` - The point on the unit sphere.
    fn populate(&self, surf: &mut SurfaceEvent, position: Point3f) {
        surf.position = position;
        surf.uv = sphere_uv(position);

        let normal = Vector3f::from(position).normalize();
        let mut tangent = normal.cross(&Vector3f::new(0.0, 1.0, 0.0));
        if tangent.length_squared() < EPSILON {
            // Degenerate at the poles where the normal is parallel to the
            // y-axis.
            surf.frame = Frame::new(normal);
        } else {
            tangent = tangent.normalize();
            let bitangent = normal.cross(&tangent).normalize();
            surf.frame = Frame::from_axes(tangent, bitangent, normal);
        }

        surf.pdf = INV_FOUR_PI;
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        let _ = rng;

        // Quadratic coefficients for |o + t*d|^2 = 1 with unit direction
        // assumed only up to scale; the leading coefficient is |d|^2.
        let a = ray.direction.length_squared();
        let to_origin = Vector3f::from(ray.origin);
        let b = 2.0 * ray.direction.dot(&to_origin);
        let c = to_origin.length_squared() - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }

        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);

        // Take the smaller root above the self-intersection threshold.
        let t = if t1 > EPSILON {
            t1
        } else if t2 > EPSILON {
            t2
        } else {
            return false;
        };

        if t > its.t {
            return false;
        }

        // Reproject onto the sphere so positions are exact.
        let position = Point3f::from(Vector3f::from(ray.at(t)).normalize());

        its.t = t;
        self.populate(&mut its.surf, position);
        true
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0))
    }

    fn centroid(&self) -> Point3f {
        Point3f::zero()
    }

    fn sample_area(&self, rng: &mut dyn Sampler) -> AreaSample {
        let position = Point3f::from(square_to_uniform_sphere(rng.next_2d()));
        let mut sample = AreaSample {
            surf: SurfaceEvent::default(),
            area: 4.0 * PI,
        };
        self.populate(&mut sample.surf, position);
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::geometry::Point2i;

    struct NullSampler;

    impl Sampler for NullSampler {
        fn samples_per_pixel(&self) -> usize {
            1
        }
        fn seed(&mut self, _pixel: Point2i, _sample_index: usize) {}
        fn next(&mut self) -> Float {
            0.5
        }
        fn clone_sampler(&self) -> Box<dyn Sampler> {
            Box::new(NullSampler)
        }
    }

    #[test]
    fn frontal_hit_distance() {
        // A ray through the centre hits at distance |origin| - 1.
        let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        assert!(Sphere::new().intersect(&ray, &mut its, &mut NullSampler));
        assert!((its.t - 2.0).abs() < 1e-4);
        assert!((its.surf.position - Point3f::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((its.surf.frame.normal - Vector3f::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn inside_hit_takes_far_root() {
        let ray = Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        let mut its = Intersection::new(-ray.direction);
        assert!(Sphere::new().intersect(&ray, &mut its, &mut NullSampler));
        assert!((its.t - 1.0).abs() < 1e-4);
    }

    #[test]
    fn farther_hit_is_dismissed() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::with_limit(-ray.direction, 1.5);
        assert!(!Sphere::new().intersect(&ray, &mut its, &mut NullSampler));
        assert_eq!(its.t, 1.5);
    }

    #[test]
    fn miss() {
        let ray = Ray::new(Point3f::new(0.0, 2.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        assert!(!Sphere::new().intersect(&ray, &mut its, &mut NullSampler));
    }

    #[test]
    fn area_samples_lie_on_sphere() {
        let mut rng = crate::tests_support::StreamSampler::new(3);
        for _ in 0..100 {
            let sample = Sphere::new().sample_area(&mut rng);
            assert!((Vector3f::from(sample.surf.position).length() - 1.0).abs() < 1e-4);
            assert_eq!(sample.surf.pdf, INV_FOUR_PI);
            assert!(sample.surf.frame.orthonormality_error() < 1e-4);
        }
    }
}
