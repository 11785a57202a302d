//! Conductor BSDF

#![allow(dead_code)]

use lumo_core::geometry::{Point2f, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::reflection::{reflect, Bsdf, BsdfEval, BsdfSample};
use lumo_core::sampler::Sampler;
use lumo_core::texture::{ArcTexture, Texture};

/// A perfectly smooth mirror.
pub struct Conductor {
    /// The reflectance of the surface.
    reflectance: ArcTexture,
}

impl Conductor {
    /// Create a new `Conductor` BSDF.
    ///
    /// * `props` - Construction properties (`reflectance` texture).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            reflectance: props.require_texture("reflectance")?,
        })
    }

    /// Create a new `Conductor` BSDF from a texture.
    ///
    /// * `reflectance` - The reflectance of the surface.
    pub fn with_reflectance(reflectance: ArcTexture) -> Self {
        Self { reflectance }
    }
}

impl Bsdf for Conductor {
    fn evaluate(&self, _uv: Point2f, _wo: &Vector3f, _wi: &Vector3f) -> BsdfEval {
        // The probability of a light sample picking exactly the mirror
        // direction is zero, so the Dirac lobe always evaluates to black.
        BsdfEval::invalid()
    }

    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        let _ = rng;
        BsdfSample {
            wi: reflect(wo, &Vector3f::new(0.0, 0.0, 1.0)),
            weight: self.reflectance.evaluate(uv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;
    use lumo_core::color::Color;
    use std::sync::Arc;

    struct Gray;

    impl lumo_core::texture::Texture for Gray {
        fn evaluate(&self, _uv: Point2f) -> Color {
            Color::gray(0.8)
        }
    }

    #[test]
    fn mirror_reflects_across_the_normal() {
        let bsdf = Conductor::with_reflectance(Arc::new(Gray));
        let wo = Vector3f::new(0.5, -0.25, 0.8).normalize();
        let mut rng = StreamSampler::new(1);
        let sample = bsdf.sample(Point2f::zero(), &wo, &mut rng);
        assert!((sample.wi.x + wo.x).abs() < 1e-5);
        assert!((sample.wi.y + wo.y).abs() < 1e-5);
        assert!((sample.wi.z - wo.z).abs() < 1e-5);
        assert_eq!(sample.weight, Color::gray(0.8));
    }

    #[test]
    fn dirac_lobe_evaluates_to_black() {
        let bsdf = Conductor::with_reflectance(Arc::new(Gray));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        assert!(bsdf.evaluate(Point2f::zero(), &wo, &wo).value.is_black());
    }
}
