//! Principled BSDF

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Frame, Point2f, Vector3f};
use lumo_core::microfacet;
use lumo_core::properties::Properties;
use lumo_core::reflection::{reflect, schlick, Bsdf, BsdfEval, BsdfSample};
use lumo_core::sampler::Sampler;
use lumo_core::sampling::square_to_cosine_hemisphere;
use lumo_core::texture::{ArcTexture, Texture};

/// The diffuse lobe of the principled model.
struct DiffuseLobe {
    color: Color,
}

impl DiffuseLobe {
    fn evaluate(&self, wi: &Vector3f) -> Color {
        let foreshortening = Frame::cos_theta(wi);
        if foreshortening < 0.0 {
            return Color::BLACK;
        }
        self.color * INV_PI * foreshortening
    }

    fn sample(&self, rng: &mut dyn Sampler) -> BsdfSample {
        BsdfSample {
            wi: square_to_cosine_hemisphere(rng.next_2d()),
            weight: self.color,
        }
    }
}

/// The metallic GGX lobe of the principled model.
struct MetallicLobe {
    alpha: Float,
    color: Color,
}

impl MetallicLobe {
    fn evaluate(&self, wo: &Vector3f, wi: &Vector3f) -> Color {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return Color::BLACK;
        }
        let m = (*wo + *wi).normalize();
        let numerator = self.color
            * microfacet::evaluate_ggx(self.alpha, &m)
            * microfacet::smith_g1(self.alpha, &m, wo)
            * microfacet::smith_g1(self.alpha, &m, wi);
        // The foreshortening cos θ_i cancels in the denominator.
        numerator / (4.0 * Frame::cos_theta(wo))
    }

    fn sample(&self, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        let m = microfacet::sample_ggx_vndf(self.alpha, wo, rng.next_2d());
        let wi = reflect(wo, &m);
        if Frame::cos_theta(&wi) <= 0.0 {
            return BsdfSample::invalid();
        }
        BsdfSample {
            wi,
            weight: self.color * microfacet::smith_g1(self.alpha, &m, &wi),
        }
    }
}

/// The lobes of the principled model for one shading point, with the
/// probability of sampling the diffuse one.
struct Combination {
    diffuse_selection_prob: Float,
    diffuse: DiffuseLobe,
    metallic: MetallicLobe,
}

/// A layered "principled" material mixing a diffuse and a metallic GGX
/// lobe, parameterised by base color, roughness, metallic and specular
/// amounts with an approximate Schlick Fresnel.
pub struct Principled {
    base_color: ArcTexture,
    roughness: ArcTexture,
    metallic: ArcTexture,
    specular: ArcTexture,
}

impl Principled {
    /// Create a new `Principled` BSDF.
    ///
    /// * `props` - Construction properties (`baseColor`, `roughness`,
    ///             `metallic` and `specular` textures).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            base_color: props.require_texture("baseColor")?,
            roughness: props.require_texture("roughness")?,
            metallic: props.require_texture("metallic")?,
            specular: props.require_texture("specular")?,
        })
    }

    /// Create a new `Principled` BSDF from textures.
    pub fn with_textures(
        base_color: ArcTexture,
        roughness: ArcTexture,
        metallic: ArcTexture,
        specular: ArcTexture,
    ) -> Self {
        Self {
            base_color,
            roughness,
            metallic,
            specular,
        }
    }

    /// Computes the lobe mixture for one shading point. The lobe selection
    /// probability is proportional to the mean lobe reflectance.
    fn combine(&self, uv: Point2f, wo: &Vector3f) -> Combination {
        let base_color = self.base_color.evaluate(uv);
        let alpha = max(1e-3, sqr(self.roughness.scalar(uv)));
        let specular = self.specular.scalar(uv);
        let metallic = self.metallic.scalar(uv);
        let fresnel = specular * schlick((1.0 - metallic) * 0.08, Frame::cos_theta(wo));

        let diffuse = DiffuseLobe {
            color: base_color * ((1.0 - fresnel) * (1.0 - metallic)),
        };
        let metallic = MetallicLobe {
            alpha,
            color: Color::WHITE * fresnel + base_color * ((1.0 - fresnel) * metallic),
        };

        let diffuse_mean = diffuse.color.mean();
        let metallic_mean = metallic.color.mean();
        let total = diffuse_mean + metallic_mean;
        let diffuse_selection_prob = if total > 0.0 { diffuse_mean / total } else { 0.0 };

        Combination {
            diffuse_selection_prob,
            diffuse,
            metallic,
        }
    }
}

impl Bsdf for Principled {
    fn evaluate(&self, uv: Point2f, wo: &Vector3f, wi: &Vector3f) -> BsdfEval {
        let combination = self.combine(uv, wo);
        BsdfEval {
            value: combination.diffuse.evaluate(wi) + combination.metallic.evaluate(wo, wi),
        }
    }

    fn sample(&self, uv: Point2f, wo: &Vector3f, rng: &mut dyn Sampler) -> BsdfSample {
        let combination = self.combine(uv, wo);
        let prob = combination.diffuse_selection_prob;

        if rng.next() < prob {
            let mut sample = combination.diffuse.sample(rng);
            if prob > 0.0 {
                sample.weight /= prob;
            }
            sample
        } else {
            let mut sample = combination.metallic.sample(wo, rng);
            if sample.is_invalid() {
                return sample;
            }
            if prob < 1.0 {
                sample.weight /= 1.0 - prob;
            }
            sample
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;
    use lumo_core::texture::Texture;
    use std::sync::Arc;

    struct Constant(Color);

    impl Texture for Constant {
        fn evaluate(&self, _uv: Point2f) -> Color {
            self.0
        }
    }

    fn material(metallic: Float, roughness: Float) -> Principled {
        Principled::with_textures(
            Arc::new(Constant(Color::new(0.8, 0.4, 0.2))),
            Arc::new(Constant(Color::gray(roughness))),
            Arc::new(Constant(Color::gray(metallic))),
            Arc::new(Constant(Color::gray(1.0))),
        )
    }

    #[test]
    fn fully_metallic_has_no_diffuse_lobe() {
        let bsdf = material(1.0, 0.3);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let combination = bsdf.combine(Point2f::zero(), &wo);
        assert!(combination.diffuse.color.is_black());
        assert_eq!(combination.diffuse_selection_prob, 0.0);
    }

    #[test]
    fn evaluate_sums_both_lobes() {
        let bsdf = material(0.5, 0.5);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.3, 0.0, 0.95).normalize();
        let combination = bsdf.combine(Point2f::zero(), &wo);
        let expected = combination.diffuse.evaluate(&wi) + combination.metallic.evaluate(&wo, &wi);
        let actual = bsdf.evaluate(Point2f::zero(), &wo, &wi).value;
        assert!((expected.r - actual.r).abs() < 1e-6);
        assert!((expected.g - actual.g).abs() < 1e-6);
    }

    #[test]
    fn below_horizon_evaluates_to_black() {
        let bsdf = material(0.2, 0.4);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.0, 0.3, -0.95).normalize();
        assert!(bsdf.evaluate(Point2f::zero(), &wo, &wi).value.is_black());
    }

    #[test]
    fn lobe_probability_compensation_keeps_the_estimator_unbiased() {
        // The average sampled weight should match the average of
        // evaluate/pdf; a cheap proxy is that weights stay finite and
        // non-negative across many draws.
        let bsdf = material(0.5, 0.6);
        let mut rng = StreamSampler::new(5);
        let wo = Vector3f::new(0.1, 0.2, 0.97).normalize();
        for _ in 0..1000 {
            let sample = bsdf.sample(Point2f::zero(), &wo, &mut rng);
            if sample.is_invalid() {
                continue;
            }
            assert!(sample.weight.r.is_finite());
            assert!(sample.weight.r >= 0.0);
            assert!(Frame::cos_theta(&sample.wi) > 0.0);
        }
    }
}
