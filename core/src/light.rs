//! Light Interface

#![allow(dead_code)]

use crate::color::Color;
use crate::common::Float;
use crate::geometry::{Point3f, Vector3f};
use crate::sampler::Sampler;
use std::sync::Arc;

/// The result of sampling a direct-illumination contribution from a light
/// towards a shading point. The weight includes all geometric terms, so that
/// `weight · bsdf(wi)` with pdf one is the unbiased contribution of the
/// light.
#[derive(Copy, Clone, Debug)]
pub struct DirectLightSample {
    /// Direction from the shading point towards the light.
    pub wi: Vector3f,

    /// The weighted radiance arriving from the light.
    pub weight: Color,

    /// Distance from the shading point to the light, infinite for lights at
    /// infinity.
    pub distance: Float,
}

impl DirectLightSample {
    /// Returns a zero-weight sample to report that sampling failed.
    pub fn invalid() -> Self {
        Self {
            wi: Vector3f::zero(),
            weight: Color::BLACK,
            distance: 0.0,
        }
    }
}

/// A light source that can be sampled for next-event estimation.
pub trait Light: Send + Sync {
    /// Samples a direct-illumination contribution towards a shading point.
    ///
    /// * `origin` - The shading point receiving the illumination.
    /// * `rng`    - The sampler driving the sampling decisions.
    fn sample_direct(&self, origin: Point3f, rng: &mut dyn Sampler) -> DirectLightSample;

    /// Reports whether the light's radiance is also reachable by random
    /// surface hits. Integrators skip next-event estimation for such lights
    /// to avoid counting them twice.
    fn can_be_intersected(&self) -> bool;
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light>;

/// The result of evaluating the background illumination for a direction.
#[derive(Copy, Clone, Debug)]
pub struct BackgroundLightEval {
    /// The radiance arriving from the background.
    pub value: Color,
}

/// A light that provides radiance for rays leaving the scene, in addition to
/// being sampleable.
pub trait BackgroundLight: Light {
    /// Evaluates the background radiance for a direction pointing away from
    /// the scene.
    ///
    /// * `direction` - The world-space direction.
    fn evaluate(&self, direction: &Vector3f) -> BackgroundLightEval;
}

/// Atomic reference counted `BackgroundLight`.
pub type ArcBackgroundLight = Arc<dyn BackgroundLight>;

/// The result of picking a random light for next-event estimation.
#[derive(Clone)]
pub struct LightSample {
    /// The light source that has been picked.
    pub light: ArcLight,

    /// The probability of this light source having been picked.
    pub probability: Float,
}
