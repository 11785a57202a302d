//! Diffuse BSDF

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Frame, Point2f, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::reflection::{Bsdf, BsdfEval, BsdfSample};
use lumo_core::sampler::Sampler;
use lumo_core::sampling::square_to_cosine_hemisphere;
use lumo_core::texture::{ArcTexture, Texture};

/// An ideally diffuse surface scattering light uniformly into the upper
/// hemisphere.
pub struct Diffuse {
    /// The albedo of the surface.
    albedo: ArcTexture,
}

impl Diffuse {
    /// Create a new `Diffuse` BSDF.
    ///
    /// * `props` - Construction properties (`albedo` texture).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            albedo: props.require_texture("albedo")?,
        })
    }

    /// Create a new `Diffuse` BSDF from a texture.
    ///
    /// * `albedo` - The albedo of the surface.
    pub fn with_albedo(albedo: ArcTexture) -> Self {
        Self { albedo }
    }
}

impl Bsdf for Diffuse {
    fn evaluate(&self, uv: Point2f, wo: &Vector3f, wi: &Vector3f) -> BsdfEval {
        let _ = wo;
        let foreshortening = Frame::cos_theta(wi);
        if foreshortening < 0.0 {
            return BsdfEval::invalid();
        }
        BsdfEval {
            value: self.albedo.evaluate(uv) * INV_PI * foreshortening,
        }
    }

    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        // Mirror the lobe to the side of the observer.
        let wi = square_to_cosine_hemisphere(rng.next_2d()) * sign(Frame::cos_theta(wo));

        // The cosine-weighted pdf cancels against the foreshortening and
        // the 1/π of the reflectance, leaving only the albedo.
        BsdfSample {
            wi,
            weight: self.albedo.evaluate(uv),
        }
    }
}
