//! Reflection Models

#![allow(dead_code)]

use crate::color::Color;
use crate::common::*;
use crate::geometry::{Point2f, Vector3f};
use crate::sampler::Sampler;
use std::sync::Arc;

/// The result of evaluating a BSDF for a pair of directions. The value is
/// the reflectance times `cos θ_i` with respect to the solid-angle measure.
#[derive(Copy, Clone, Debug)]
pub struct BsdfEval {
    /// The BSDF value times the cosine foreshortening term.
    pub value: Color,
}

impl BsdfEval {
    /// Returns a zero evaluation, used for invalid direction pairs.
    pub fn invalid() -> Self {
        Self {
            value: Color::BLACK,
        }
    }
}

/// The result of importance sampling a BSDF. The weight already contains
/// `f · |cos θ_i| / pdf`, so estimators multiply it in directly.
#[derive(Copy, Clone, Debug)]
pub struct BsdfSample {
    /// The sampled incident direction in the shading frame, pointing away
    /// from the surface.
    pub wi: Vector3f,

    /// The sample weight `f · |cos θ_i| / pdf`.
    pub weight: Color,
}

impl BsdfSample {
    /// Returns an invalid sample signalling that path sampling failed and
    /// the path should be terminated.
    pub fn invalid() -> Self {
        Self {
            wi: Vector3f::zero(),
            weight: Color::BLACK,
        }
    }

    /// Reports whether this sample is unusable.
    pub fn is_invalid(&self) -> bool {
        self.weight.is_black()
    }
}

/// A bidirectional scattering distribution function. All directions are
/// expressed in the shading frame; `wo` points away from the surface towards
/// the observer, and the sampled `wi` also points away from the surface.
pub trait Bsdf: Send + Sync {
    /// Evaluates the BSDF times the cosine term for a given pair of
    /// directions. Returns zero for the invalid half-space.
    ///
    /// * `uv` - Texture coordinates of the surface point.
    /// * `wo` - Outgoing direction in the shading frame.
    /// * `wi` - Incident direction in the shading frame.
    fn evaluate(&self, uv: Point2f, wo: &Vector3f, wi: &Vector3f) -> BsdfEval;

    /// Importance samples an incident direction for a given outgoing
    /// direction. May return an invalid sample to signal termination.
    ///
    /// * `uv`  - Texture coordinates of the surface point.
    /// * `wo`  - Outgoing direction in the shading frame.
    /// * `rng` - The sampler steering the random decisions.
    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample;
}

/// Atomic reference counted `Bsdf`.
pub type ArcBsdf = Arc<dyn Bsdf>;

/// Reflects a direction across a normal. Both the input and the result point
/// away from the surface.
///
/// * `w` - The direction to reflect.
/// * `n` - The normal to reflect across.
pub fn reflect(w: &Vector3f, n: &Vector3f) -> Vector3f {
    *n * (2.0 * w.dot(n)) - *w
}

/// Refracts a direction at a normal for a given relative index of
/// refraction, or returns `None` under total internal reflection.
///
/// * `w`   - The direction to refract, pointing away from the surface on the
///           same side as `n`.
/// * `n`   - The surface normal on the side of `w`.
/// * `eta` - The relative index of refraction from the side of `w`.
pub fn refract(w: &Vector3f, n: &Vector3f, eta: Float) -> Option<Vector3f> {
    let inv_eta = 1.0 / eta;
    let cos_theta_i = n.dot(w);
    let cos_theta_t_sqr = 1.0 - sqr(inv_eta) * (1.0 - sqr(cos_theta_i));
    if cos_theta_t_sqr <= 0.0 {
        return None;
    }
    let cos_theta_t = cos_theta_t_sqr.sqrt();
    Some(*n * (inv_eta * cos_theta_i - cos_theta_t) - *w * inv_eta)
}

/// Computes the unpolarized Fresnel reflectance of a dielectric boundary.
///
/// * `cos_theta_i` - Cosine between the incident direction and the normal.
/// * `eta`         - Relative index of refraction on the incident side.
pub fn fresnel_dielectric(cos_theta_i: Float, eta: Float) -> Float {
    let inv_eta = 1.0 / eta;
    let cos_theta_t_sqr = 1.0 - sqr(inv_eta) * (1.0 - sqr(cos_theta_i));
    if cos_theta_t_sqr <= 0.0 {
        // Total internal reflection.
        return 1.0;
    }

    let cos_theta_i = cos_theta_i.abs();
    let cos_theta_t = cos_theta_t_sqr.sqrt();

    let rs = (cos_theta_i - eta * cos_theta_t) / (cos_theta_i + eta * cos_theta_t);
    let rp = (eta * cos_theta_i - cos_theta_t) / (eta * cos_theta_i + cos_theta_t);

    0.5 * (sqr(rs) + sqr(rp))
}

/// Schlick's approximation of the Fresnel reflectance.
///
/// * `f0`        - Reflectance at normal incidence.
/// * `cos_theta` - Cosine between the direction and the normal.
pub fn schlick(f0: Float, cos_theta: Float) -> Float {
    let m = clamp(1.0 - cos_theta, 0.0, 1.0);
    f0 + (1.0 - f0) * m * m * m * m * m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_mirrors_across_normal() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let w = Vector3f::new(1.0, 0.0, 1.0).normalize();
        let r = reflect(&w, &n);
        assert!((r - Vector3f::new(-1.0, 0.0, 1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn refraction_obeys_snell() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let w = Vector3f::new(1.0, 0.0, 1.0).normalize();
        let eta = 1.5;
        let wt = refract(&w, &n, eta).unwrap();
        let sin_i = w.cross(&n).length();
        let sin_t = wt.cross(&n).length();
        assert!((sin_i - eta * sin_t).abs() < 1e-4);
    }

    #[test]
    fn total_internal_reflection() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        // Grazing exit from the dense side.
        let w = Vector3f::new(0.95, 0.0, 0.15).normalize();
        assert!(refract(&w, &n, 1.0 / 1.5).is_none());
        assert_eq!(fresnel_dielectric(w.z, 1.0 / 1.5), 1.0);
    }

    #[test]
    fn fresnel_at_normal_incidence() {
        // ((η-1)/(η+1))^2 for η = 1.5 is 0.04.
        let f = fresnel_dielectric(1.0, 1.5);
        assert!((f - 0.04).abs() < 1e-3);
        assert!((schlick(0.04, 1.0) - 0.04).abs() < 1e-6);
    }
}
