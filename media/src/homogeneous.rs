//! Homogeneous Medium

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Ray, Vector3f};
use lumo_core::medium::Medium;
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;
use lumo_core::sampling::square_to_uniform_sphere;

/// A medium with constant extinction and scattering coefficients and an
/// isotropic phase function. Free-flight distances follow the exponential
/// of the extinction coefficient.
pub struct HomogeneousMedium {
    /// Extinction coefficient σ_t, the combined effect of absorption and
    /// out-scattering per unit distance.
    sigma_t: Float,

    /// Scattering coefficient σ_s, the radiance redirected at a scattering
    /// event.
    sigma_s: Color,
}

impl HomogeneousMedium {
    /// Create a new `HomogeneousMedium`.
    ///
    /// * `props` - Construction properties (`density` as σ_t, `sigmaS` as
    ///             σ_s).
    pub fn new(props: &Properties) -> Result<Self, String> {
        let sigma_t = props.require_float("density")?;
        if sigma_t <= 0.0 {
            return Err(format!("medium density must be positive, got {sigma_t}"));
        }
        Ok(Self {
            sigma_t,
            sigma_s: props.color_or("sigmaS", Color::gray(sigma_t)),
        })
    }

    /// Create a new `HomogeneousMedium` from explicit coefficients.
    ///
    /// * `sigma_t` - Extinction coefficient.
    /// * `sigma_s` - Scattering coefficient.
    pub fn with_coefficients(sigma_t: Float, sigma_s: Color) -> Self {
        Self { sigma_t, sigma_s }
    }
}

impl Medium for HomogeneousMedium {
    fn tr(&self, ray: &Ray, t: Float, rng: &mut dyn Sampler) -> Float {
        let _ = rng;
        let travelled = min(t * ray.direction.length(), Float::MAX);
        (-self.sigma_t * travelled).exp()
    }

    fn sample_hit_distance(&self, ray: &Ray, rng: &mut dyn Sampler) -> Float {
        let distance = -(1.0 - rng.next()).ln() / self.sigma_t;
        distance / ray.direction.length()
    }

    fn sample_phase(&self, wo: &Vector3f, rng: &mut dyn Sampler) -> Vector3f {
        let _ = wo;
        square_to_uniform_sphere(rng.next_2d())
    }

    fn prob_of_sampling_before_t(&self, t: Float) -> Float {
        (-self.sigma_t * t).exp()
    }

    fn prob_of_sampling_this_point(&self, t: Float) -> Float {
        self.sigma_t * (-self.sigma_t * t).exp()
    }

    fn sigma_s(&self) -> Color {
        self.sigma_s
    }
}
