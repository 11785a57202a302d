//! Rough Conductor BSDF

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Frame, Point2f, Vector3f};
use lumo_core::microfacet;
use lumo_core::properties::Properties;
use lumo_core::reflection::{reflect, Bsdf, BsdfEval, BsdfSample};
use lumo_core::sampler::Sampler;
use lumo_core::texture::{ArcTexture, Texture};

/// A rough metallic surface modelled by a GGX microfacet distribution with
/// visible-normal sampling.
pub struct RoughConductor {
    /// The reflectance of the surface.
    reflectance: ArcTexture,

    /// The user-facing roughness in [0, 1].
    roughness: ArcTexture,
}

impl RoughConductor {
    /// Create a new `RoughConductor` BSDF.
    ///
    /// * `props` - Construction properties (`reflectance` and `roughness`
    ///             textures).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            reflectance: props.require_texture("reflectance")?,
            roughness: props.require_texture("roughness")?,
        })
    }

    /// Create a new `RoughConductor` BSDF from textures.
    pub fn with_textures(reflectance: ArcTexture, roughness: ArcTexture) -> Self {
        Self {
            reflectance,
            roughness,
        }
    }

    /// Maps the user roughness to the distribution parameter. The squared
    /// value gives a perceptually more gradual transition from specular to
    /// rough; extremely specular distributions are clamped for numerical
    /// stability.
    fn alpha(&self, uv: Point2f) -> Float {
        max(1e-3, sqr(self.roughness.scalar(uv)))
    }
}

impl Bsdf for RoughConductor {
    fn evaluate(&self, uv: Point2f, wo: &Vector3f, wi: &Vector3f) -> BsdfEval {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return BsdfEval::invalid();
        }

        let alpha = self.alpha(uv);

        // The microfacet normal responsible for this direction pair.
        let m = (*wo + *wi).normalize();

        let numerator = self.reflectance.evaluate(uv)
            * microfacet::evaluate_ggx(alpha, &m)
            * microfacet::smith_g1(alpha, &m, wi)
            * microfacet::smith_g1(alpha, &m, wo);
        // The foreshortening cos θ_i cancels one cosine of the denominator.
        let denominator = 4.0 * Frame::cos_theta(wo);

        BsdfEval {
            value: numerator / denominator,
        }
    }

    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        if Frame::cos_theta(wo) <= 0.0 {
            return BsdfSample::invalid();
        }

        let alpha = self.alpha(uv);

        let m = microfacet::sample_ggx_vndf(alpha, wo, rng.next_2d());
        let wi = reflect(wo, &m);
        if Frame::cos_theta(&wi) <= 0.0 {
            return BsdfSample::invalid();
        }

        // All other microfacet terms cancel against the visible-normal pdf,
        // leaving the masking of the sampled incident direction.
        BsdfSample {
            wi,
            weight: self.reflectance.evaluate(uv) * microfacet::smith_g1(alpha, &m, &wi),
        }
    }
}
