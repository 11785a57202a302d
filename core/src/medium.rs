//! Medium Interface

#![allow(dead_code)]

use crate::color::Color;
use crate::common::Float;
use crate::geometry::{Ray, Vector3f};
use crate::sampler::Sampler;
use std::sync::Arc;

/// A participating medium filling the interior of an instance.
pub trait Medium: Send + Sync {
    /// Evaluates the beam transmittance along a ray up to parametric
    /// distance `t`, accounting for the length of the ray direction.
    ///
    /// * `ray` - The ray through the medium.
    /// * `t`   - The parametric distance travelled.
    /// * `rng` - The sampler driving stochastic transmittance estimation.
    fn tr(&self, ray: &Ray, t: Float, rng: &mut dyn Sampler) -> Float;

    /// Samples a tentative scattering distance along the ray, in parametric
    /// units of the ray direction.
    ///
    /// * `ray` - The ray through the medium.
    /// * `rng` - The sampler driving the sampling decisions.
    fn sample_hit_distance(&self, ray: &Ray, rng: &mut dyn Sampler) -> Float;

    /// Samples a scattered direction from the phase function.
    ///
    /// * `wo`  - Direction towards the previous path vertex.
    /// * `rng` - The sampler driving the sampling decisions.
    fn sample_phase(&self, wo: &Vector3f, rng: &mut dyn Sampler) -> Vector3f;

    /// Probability that the sampled scattering distance exceeds `t`, i.e.
    /// that the free flight reaches at least that far.
    ///
    /// * `t` - Distance along a unit-speed ray.
    fn prob_of_sampling_before_t(&self, t: Float) -> Float;

    /// Probability density of sampling a scattering event exactly at
    /// distance `t`.
    ///
    /// * `t` - Distance along a unit-speed ray.
    fn prob_of_sampling_this_point(&self, t: Float) -> Float;

    /// The scattering coefficient of the medium.
    fn sigma_s(&self) -> Color;
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium>;
