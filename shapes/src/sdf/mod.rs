//! Signed Distance Function Shapes

#![allow(dead_code)]

mod node;
mod operations;
mod primitives;

// Re-export.
pub use node::*;
pub use operations::*;
pub use primitives::*;

use lumo_core::autodiff::DualVector;
use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Frame, Point2f, Point3f, Ray, Vector3f};
use lumo_core::interaction::{Intersection, SurfaceEvent};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;
use lumo_core::shape::Shape;

/// How far a ray origin that starts on the surface is advanced before
/// marching, in multiples of the intersection tolerance.
const ADVANCE_MULTIPLIER: Float = 3.0;

/// How texture coordinates are derived for SDF hits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UvMapping {
    /// Constant (0, 0) coordinates.
    None,

    /// Equirectangular coordinates of the hit direction from the origin.
    Spherical,
}

/// A shape whose surface is the zero level-set of a signed distance
/// function, intersected by sphere-tracing the composed distance tree.
pub struct SdfShape {
    /// Maximum number of ray-marching steps before counting as a miss.
    max_steps: usize,

    /// Distance to the surface below which a march counts as a hit.
    min_distance: Float,

    /// The distance function tree.
    child: ArcSdfNode,

    /// Precomputed bounding box of the tree.
    bounds: Bounds3f,

    /// How texture coordinates are derived for hits.
    mapping: UvMapping,
}

impl SdfShape {
    /// Create a new `SdfShape`.
    ///
    /// * `child` - The distance function tree.
    /// * `props` - Construction properties (`maxSteps`, `minDistance`,
    ///             `mapping`).
    pub fn new(child: ArcSdfNode, props: &Properties) -> Result<Self, String> {
        let max_steps = props.int_or("maxSteps", 50) as usize;
        let min_distance = props.float_or("minDistance", 0.01);
        let mapping = props.enumeration(
            "mapping",
            UvMapping::None,
            &[("none", UvMapping::None), ("spherical", UvMapping::Spherical)],
        )?;

        let bounds = child.bounds();
        info!(
            "built bounding box for SDF with min={:?} max={:?}",
            bounds.p_min, bounds.p_max
        );

        Ok(Self {
            max_steps,
            min_distance,
            child,
            bounds,
            mapping,
        })
    }

    /// Evaluates the distance of a point to the surface.
    fn distance_at(&self, p: Point3f) -> Float {
        self.child.distance(&DualVector::constant(p)).v
    }
}

impl Shape for SdfShape {
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        let _ = rng;

        // If the ray starts on (or inside of) the surface shell, advance the
        // origin slightly to avoid re-finding the same hit.
        let origin_distance = self.distance_at(ray.origin);
        let advance = if ray.depth >= 1 || origin_distance.abs() < self.min_distance {
            self.min_distance * ADVANCE_MULTIPLIER
        } else {
            0.0
        };
        let march_ray = Ray::with_depth(ray.at(advance), ray.direction, ray.depth);

        // Reject rays that miss the precomputed bounds entirely.
        let bounds_t = self.bounds.intersect(&march_ray);
        if bounds_t == INFINITY {
            return false;
        }

        // When the march starts inside the object every distance is negated,
        // which inverts the SDF and finds the nearest exit instead.
        let distance_multiplier = if self.distance_at(march_ray.origin) < 0.0 {
            -1.0
        } else {
            1.0
        };

        let mut marched = 0.0;
        let mut steps = 0;
        while steps < self.max_steps {
            let position = march_ray.at(marched);
            let distance = distance_multiplier * self.distance_at(position);

            // Hit would be obstructed by an existing intersection, escaped
            // to infinity, or left the bounds past their entry point.
            if advance + marched > its.t
                || marched >= INFINITY
                || (marched > bounds_t && !self.bounds.includes(position))
            {
                return false;
            }

            if distance.abs() < self.min_distance {
                break;
            }

            // Advance by the unsigned distance, but never by less than half
            // the tolerance so grazing marches cannot stall.
            marched += max(distance.abs(), self.min_distance / 2.0);
            steps += 1;
        }

        if steps >= self.max_steps {
            return false;
        }

        let position = march_ray.at(marched);

        its.t = advance + marched;
        its.stats.sdf_step_fraction = steps as Float / self.max_steps as Float;
        populate_sdf_surface(
            &mut its.surf,
            position,
            self.child.as_ref(),
            distance_multiplier,
            self.mapping,
        );
        true
    }

    fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    fn centroid(&self) -> Point3f {
        self.bounds.centroid()
    }
}

/// Builds the surface event for an SDF hit: the normal is the gradient of
/// the distance function, obtained by evaluating the tree on dual numbers.
fn populate_sdf_surface(
    surf: &mut SurfaceEvent,
    position: Point3f,
    sdf: &dyn SdfNode,
    distance_multiplier: Float,
    mapping: UvMapping,
) {
    surf.position = position;

    let gradient = sdf.distance(&DualVector::variable(position));
    let normal =
        (Vector3f::new(gradient.dx, gradient.dy, gradient.dz) * distance_multiplier).normalize();

    let mut tangent = normal.cross(&Vector3f::new(1.0, 0.0, 0.0));
    if tangent.length_squared() < EPSILON {
        tangent = normal.cross(&Vector3f::new(1.0, 1.0, 0.0));
    }
    let tangent = tangent.normalize();
    let bitangent = normal.cross(&tangent).normalize();
    surf.frame = Frame::from_axes(tangent, bitangent, normal);

    surf.uv = match mapping {
        UvMapping::None => Point2f::zero(),
        UvMapping::Spherical => {
            let d = Vector3f::from(position).normalize();
            let theta = clamp(d.y, -1.0, 1.0).acos();
            let phi = d.z.atan2(d.x);
            Point2f::new((phi + PI) * INV_TWO_PI, theta * INV_PI)
        }
    };

    surf.pdf = 0.0;
}

/// Creates an SDF tree node from a variant name, its properties and its
/// already-constructed children.
///
/// * `variant`  - The node variant name.
/// * `props`    - The construction properties.
/// * `children` - Child nodes, in declaration order.
pub fn create_node(
    variant: &str,
    props: &Properties,
    children: Vec<ArcSdfNode>,
) -> Result<ArcSdfNode, String> {
    use std::sync::Arc;
    match variant {
        "sphere" => Ok(Arc::new(SdfSphere::from_props(props))),
        "box" => Ok(Arc::new(SdfBox::from_props(props))),
        "cylinder" => Ok(Arc::new(SdfCylinder::from_props(props))),
        "mandelbulb" => Ok(Arc::new(SdfMandelbulb::from_props(props))),
        "combine" => Ok(Arc::new(SdfCombine::new(props, children)?)),
        "thicken" => Ok(Arc::new(SdfThicken::new(props, children)?)),
        "transform" => Ok(Arc::new(SdfTransform::new(props, children)?)),
        _ => Err(format!("unknown sdf variant '{variant}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;
    use std::sync::Arc;

    fn unit_sphere_sdf() -> SdfShape {
        let node: ArcSdfNode = Arc::new(SdfSphere::new(1.0));
        SdfShape::new(node, &Properties::new()).unwrap()
    }

    #[test]
    fn sphere_sdf_hit_matches_analytic() {
        let shape = unit_sphere_sdf();
        let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(shape.intersect(&ray, &mut its, &mut rng));
        // Sphere tracing stops within the tolerance of the true distance 2.
        assert!((its.t - 2.0).abs() < 0.02);
        assert!((its.surf.frame.normal - Vector3f::new(0.0, 0.0, -1.0)).length() < 0.05);
        assert!(its.stats.sdf_step_fraction > 0.0);
    }

    #[test]
    fn sdf_miss_escapes_bounds() {
        let shape = unit_sphere_sdf();
        let ray = Ray::new(Point3f::new(0.0, 3.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(!shape.intersect(&ray, &mut its, &mut rng));
    }

    #[test]
    fn union_of_spheres_hits_the_nearer_one() {
        let mut left = Properties::new();
        left = left.insert(
            "radius",
            lumo_core::properties::Value::Float(1.0),
        );
        let a = create_node("sphere", &left, vec![]).unwrap();

        let mut shift = lumo_core::geometry::Transform::identity();
        shift.translate(Vector3f::new(0.0, 0.0, 4.0));
        let shifted = create_node(
            "transform",
            &Properties::new().insert(
                "transform",
                lumo_core::properties::Value::Transform(Arc::new(shift)),
            ),
            vec![create_node("sphere", &left, vec![]).unwrap()],
        )
        .unwrap();

        let union = create_node("combine", &Properties::new(), vec![a, shifted]).unwrap();
        let shape = SdfShape::new(union, &Properties::new()).unwrap();

        let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(shape.intersect(&ray, &mut its, &mut rng));
        assert!((its.t - 2.0).abs() < 0.02);
    }

    #[test]
    fn inside_hit_finds_the_exit() {
        let shape = unit_sphere_sdf();
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        let mut rng = StreamSampler::new(1);
        assert!(shape.intersect(&ray, &mut its, &mut rng));
        assert!((its.t - 1.0).abs() < 0.05);
    }
}
