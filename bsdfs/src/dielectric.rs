//! Dielectric BSDF

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Frame, Point2f, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::reflection::{fresnel_dielectric, reflect, refract, Bsdf, BsdfEval, BsdfSample};
use lumo_core::sampler::Sampler;
use lumo_core::texture::{ArcTexture, Texture};

/// A smooth dielectric boundary such as glass or water, stochastically
/// choosing between reflection and refraction by the Fresnel term.
///
/// Radiance (not flux) is carried along rays, so the refracted weight is
/// divided by η² on the transmit side only: radiance compresses by the
/// squared relative index of refraction when crossing into a denser medium.
pub struct Dielectric {
    /// Index of refraction of the interior relative to the outside.
    ior: ArcTexture,

    /// Reflectance scaling the mirror branch.
    reflectance: ArcTexture,

    /// Transmittance scaling the refraction branch.
    transmittance: ArcTexture,
}

impl Dielectric {
    /// Create a new `Dielectric` BSDF.
    ///
    /// * `props` - Construction properties (`ior`, `reflectance` and
    ///             `transmittance` textures).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            ior: props.require_texture("ior")?,
            reflectance: props.require_texture("reflectance")?,
            transmittance: props.require_texture("transmittance")?,
        })
    }

    /// Create a new `Dielectric` BSDF from textures.
    pub fn with_textures(
        ior: ArcTexture,
        reflectance: ArcTexture,
        transmittance: ArcTexture,
    ) -> Self {
        Self {
            ior,
            reflectance,
            transmittance,
        }
    }
}

impl Bsdf for Dielectric {
    fn evaluate(&self, _uv: Point2f, _wo: &Vector3f, _wi: &Vector3f) -> BsdfEval {
        // Both lobes are Dirac deltas; light samples never hit them.
        BsdfEval::invalid()
    }

    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        let ior = self.ior.scalar(uv);
        let cos_theta_o = Frame::cos_theta(wo);

        // Orient the boundary: entering uses the interior index, leaving
        // its reciprocal, with the normal on the side of the observer.
        let (eta, normal) = if cos_theta_o >= 0.0 {
            (ior, Vector3f::new(0.0, 0.0, 1.0))
        } else {
            (1.0 / ior, Vector3f::new(0.0, 0.0, -1.0))
        };

        let fresnel = fresnel_dielectric(cos_theta_o, eta);

        if rng.next() < fresnel {
            BsdfSample {
                wi: reflect(wo, &normal),
                weight: self.reflectance.evaluate(uv),
            }
        } else {
            match refract(wo, &normal, eta) {
                Some(wi) => BsdfSample {
                    wi,
                    weight: self.transmittance.evaluate(uv) / sqr(eta),
                },
                // Unreachable in exact arithmetic (the Fresnel term is one
                // under total internal reflection); terminate defensively.
                None => BsdfSample::invalid(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;
    use lumo_core::color::Color;
    use lumo_core::texture::Texture;
    use std::sync::Arc;

    struct Constant(Color);

    impl Texture for Constant {
        fn evaluate(&self, _uv: Point2f) -> Color {
            self.0
        }
    }

    fn glass() -> Dielectric {
        Dielectric::with_textures(
            Arc::new(Constant(Color::gray(1.5))),
            Arc::new(Constant(Color::WHITE)),
            Arc::new(Constant(Color::WHITE)),
        )
    }

    #[test]
    fn refracted_weight_carries_inverse_eta_squared() {
        let bsdf = glass();
        let mut rng = StreamSampler::new(8);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let mut saw_refraction = false;
        for _ in 0..100 {
            let sample = bsdf.sample(Point2f::zero(), &wo, &mut rng);
            if Frame::cos_theta(&sample.wi) < 0.0 {
                saw_refraction = true;
                assert!((sample.weight.r - 1.0 / (1.5 * 1.5)).abs() < 1e-5);
            } else {
                assert_eq!(sample.weight, Color::WHITE);
            }
        }
        assert!(saw_refraction);
    }

    #[test]
    fn normal_incidence_refracts_straight_through() {
        let bsdf = glass();
        // Drive the random choice into the refraction branch: the Fresnel
        // term at normal incidence is 0.04, almost every draw refracts.
        let mut rng = StreamSampler::new(3);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let mut refracted = 0;
        let mut total = 0;
        for _ in 0..1000 {
            let sample = bsdf.sample(Point2f::zero(), &wo, &mut rng);
            total += 1;
            if Frame::cos_theta(&sample.wi) < 0.0 {
                refracted += 1;
                assert!((sample.wi - Vector3f::new(0.0, 0.0, -1.0)).length() < 1e-4);
            }
        }
        let ratio = refracted as Float / total as Float;
        assert!((ratio - 0.96).abs() < 0.05);
    }

    #[test]
    fn leaving_the_medium_flips_the_relative_index() {
        let bsdf = glass();
        let mut rng = StreamSampler::new(4);
        // Observer below the surface, inside the glass.
        let wo = Vector3f::new(0.0, 0.0, -1.0);
        for _ in 0..100 {
            let sample = bsdf.sample(Point2f::zero(), &wo, &mut rng);
            if Frame::cos_theta(&sample.wi) > 0.0 {
                // Transmit side: weight is divided by (1/1.5)^2 = gain.
                assert!((sample.weight.r - 1.5 * 1.5).abs() < 1e-4);
            }
        }
    }
}
