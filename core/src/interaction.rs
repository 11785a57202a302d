//! Surface Interactions

#![allow(dead_code)]

use crate::color::Color;
use crate::common::*;
use crate::geometry::{Frame, Point2f, Point3f, Ray, Vector3f};
use crate::emission::Emission;
use crate::instance::Instance;
use crate::reflection::{Bsdf, BsdfEval, BsdfSample};
use crate::sampler::Sampler;
use std::sync::Arc;

/// The geometric description of a point on a surface, shared by ray
/// intersections and area samples.
#[derive(Clone, Debug)]
pub struct SurfaceEvent {
    /// Position of the surface point.
    pub position: Point3f,

    /// The shading frame at the surface point.
    pub frame: Frame,

    /// Texture coordinates of the surface point.
    pub uv: Point2f,

    /// Probability density of sampling this point, with respect to surface
    /// area.
    pub pdf: Float,
}

impl Default for SurfaceEvent {
    fn default() -> Self {
        Self {
            position: Point3f::zero(),
            frame: Frame::default(),
            uv: Point2f::zero(),
            pdf: 0.0,
        }
    }
}

/// The result of sampling a random point on a shape's surface.
#[derive(Clone, Debug)]
pub struct AreaSample {
    /// The sampled surface point.
    pub surf: SurfaceEvent,

    /// Surface area of the shape, when known.
    pub area: Float,
}

impl AreaSample {
    /// Creates an area sample with zero pdf to report that sampling failed.
    pub fn invalid() -> Self {
        Self {
            surf: SurfaceEvent::default(),
            area: 1.0,
        }
    }
}

/// Per-intersection statistics for debug visualisation.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntersectionStats {
    /// Fraction of the ray-marching step budget consumed before the hit.
    pub sdf_step_fraction: Float,
}

/// Describes the closest intersection of a ray with the scene. Before a hit
/// is recorded `t` is infinite and no instance is attached; shapes may only
/// replace the recorded hit with a closer one.
#[derive(Clone)]
pub struct Intersection {
    /// Distance along the ray where the intersection occurred.
    pub t: Float,

    /// Direction towards the origin of the ray, in world coordinates.
    pub wo: Vector3f,

    /// The surface point that was hit.
    pub surf: SurfaceEvent,

    /// The instance that was hit, set by the scene aggregate.
    pub instance: Option<Arc<Instance>>,

    /// When the hit surface teleports rays (a portal), the continuation ray
    /// that higher layers should trace instead of stopping here.
    pub forward_ray: Option<Ray>,

    /// Statistics of the intersection for debug visualisation.
    pub stats: IntersectionStats,
}

impl Intersection {
    /// Creates an empty intersection with infinite distance.
    ///
    /// * `wo` - Direction towards the ray origin in world coordinates.
    pub fn new(wo: Vector3f) -> Self {
        Self::with_limit(wo, INFINITY)
    }

    /// Creates an empty intersection that only accepts hits below a given
    /// distance, used for shadow rays.
    ///
    /// * `wo`    - Direction towards the ray origin in world coordinates.
    /// * `t_max` - Maximum accepted distance.
    pub fn with_limit(wo: Vector3f, t_max: Float) -> Self {
        Self {
            t: t_max,
            wo,
            surf: SurfaceEvent::default(),
            instance: None,
            forward_ray: None,
            stats: IntersectionStats::default(),
        }
    }

    /// Reports whether a surface has been hit.
    pub fn is_hit(&self) -> bool {
        self.instance.is_some()
    }

    /// Evaluates the BSDF of the hit instance for a world-space incident
    /// direction. Returns a zero evaluation when the instance has no BSDF.
    ///
    /// * `wi` - The incident direction in world coordinates.
    pub fn evaluate_bsdf(&self, wi: &Vector3f) -> BsdfEval {
        match self.instance.as_ref().and_then(|i| i.bsdf()) {
            Some(bsdf) => bsdf.evaluate(
                self.surf.uv,
                &self.surf.frame.to_local(&self.wo),
                &self.surf.frame.to_local(wi),
            ),
            None => BsdfEval::invalid(),
        }
    }

    /// Samples the BSDF of the hit instance. The returned incident direction
    /// is in world coordinates. Returns an invalid sample when the instance
    /// has no BSDF.
    ///
    /// * `rng` - The sampler driving the sampling decisions.
    pub fn sample_bsdf(&self, rng: &mut dyn Sampler) -> BsdfSample {
        match self.instance.as_ref().and_then(|i| i.bsdf()) {
            Some(bsdf) => {
                let wo_local = self.surf.frame.to_local(&self.wo);
                let mut sample = bsdf.sample(self.surf.uv, &wo_local, rng);
                if !sample.is_invalid() {
                    sample.wi = self.surf.frame.to_world(&sample.wi);
                }
                sample
            }
            None => BsdfSample::invalid(),
        }
    }

    /// Evaluates the emission of the hit instance towards the ray origin.
    /// Returns black for non-emissive surfaces.
    pub fn evaluate_emission(&self) -> Color {
        match self.instance.as_ref().and_then(|i| i.emission()) {
            Some(emission) => {
                emission
                    .evaluate(self.surf.uv, &self.surf.frame.to_local(&self.wo))
                    .value
            }
            None => Color::BLACK,
        }
    }
}
