//! Environment Maps

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Point2f, Point3f, Transform, Vector3f};
use lumo_core::light::{BackgroundLight, BackgroundLightEval, DirectLightSample, Light};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;
use lumo_core::sampling::{square_to_uniform_sphere, uniform_sphere_pdf};
use lumo_core::texture::{ArcTexture, Texture};
use std::sync::Arc;

/// An environment map surrounding the scene at infinity, evaluated through
/// an equirectangular texture lookup with the y-axis up. Sampling is
/// uniform over the sphere; the importance sampler is pluggable in the
/// sense that only `sample_direct` would change.
pub struct EnvironmentMap {
    /// The texture providing the background radiance.
    texture: ArcTexture,

    /// An optional rotation of the map.
    transform: Option<Arc<Transform>>,
}

impl EnvironmentMap {
    /// Create a new `EnvironmentMap`.
    ///
    /// * `props` - Construction properties (`texture` child, optional
    ///             `transform` child).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            texture: props.require_texture("texture")?,
            transform: props.optional_transform("transform"),
        })
    }

    /// Create a new `EnvironmentMap` from explicit values.
    ///
    /// * `texture`   - The texture providing the background radiance.
    /// * `transform` - An optional rotation of the map.
    pub fn with_texture(texture: ArcTexture, transform: Option<Arc<Transform>>) -> Self {
        Self { texture, transform }
    }
}

impl Light for EnvironmentMap {
    fn sample_direct(&self, origin: Point3f, rng: &mut dyn Sampler) -> DirectLightSample {
        let _ = origin;
        let direction = square_to_uniform_sphere(rng.next_2d());
        let radiance = self.evaluate(&direction).value;

        DirectLightSample {
            wi: direction,
            weight: radiance / uniform_sphere_pdf(),
            distance: INFINITY,
        }
    }

    fn can_be_intersected(&self) -> bool {
        false
    }
}

impl BackgroundLight for EnvironmentMap {
    fn evaluate(&self, direction: &Vector3f) -> BackgroundLightEval {
        let local = match &self.transform {
            Some(transform) => transform.inverse_vector(*direction).normalize(),
            None => direction.normalize(),
        };

        // Equirectangular parameterisation with the y-axis up.
        let theta = clamp(local.y, -1.0, 1.0).acos();
        let phi = -local.z.atan2(local.x);
        let uv = Point2f::new((phi + PI) * INV_TWO_PI, theta * INV_PI);

        BackgroundLightEval {
            value: self.texture.evaluate(uv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{ConstantTexture, StreamSampler};
    use lumo_core::color::Color;

    #[test]
    fn constant_map_evaluates_everywhere() {
        let map = EnvironmentMap::with_texture(
            std::sync::Arc::new(ConstantTexture(Color::gray(0.5))),
            None,
        );
        for direction in [
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(-0.3, 0.2, 0.9),
        ] {
            assert_eq!(map.evaluate(&direction).value, Color::gray(0.5));
        }
    }

    #[test]
    fn sample_weight_compensates_the_uniform_pdf() {
        let map = EnvironmentMap::with_texture(
            std::sync::Arc::new(ConstantTexture(Color::gray(1.0))),
            None,
        );
        let mut rng = StreamSampler::new(3);
        let sample = map.sample_direct(Point3f::zero(), &mut rng);
        assert_eq!(sample.distance, INFINITY);
        assert!((sample.weight.r - 4.0 * PI).abs() < 1e-3);
    }
}
