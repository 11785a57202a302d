//! Directional Lights

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Point3f, Vector3f};
use lumo_core::light::{DirectLightSample, Light};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// A light infinitely far away, illuminating the scene from a single
/// direction with constant intensity.
pub struct DirectionalLight {
    /// The radiance arriving from the light.
    intensity: Color,

    /// The direction towards the light.
    direction: Vector3f,
}

impl DirectionalLight {
    /// Create a new `DirectionalLight`.
    ///
    /// * `props` - Construction properties (`intensity`, `direction`).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            intensity: props.require_color("intensity")?,
            direction: props.require_vector("direction")?.normalize(),
        })
    }

    /// Create a new `DirectionalLight` from explicit values.
    ///
    /// * `intensity` - The radiance arriving from the light.
    /// * `direction` - The direction towards the light.
    pub fn with_values(intensity: Color, direction: Vector3f) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl Light for DirectionalLight {
    fn sample_direct(&self, origin: Point3f, rng: &mut dyn Sampler) -> DirectLightSample {
        let _ = (origin, rng);
        DirectLightSample {
            wi: self.direction,
            weight: self.intensity,
            distance: INFINITY,
        }
    }

    fn can_be_intersected(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::StreamSampler;

    #[test]
    fn constant_regardless_of_origin() {
        let light = DirectionalLight::with_values(Color::gray(2.0), Vector3f::new(0.0, 1.0, 0.0));
        let mut rng = StreamSampler::new(1);
        for origin in [Point3f::zero(), Point3f::new(5.0, -3.0, 2.0)] {
            let sample = light.sample_direct(origin, &mut rng);
            assert_eq!(sample.weight, Color::gray(2.0));
            assert_eq!(sample.distance, INFINITY);
            assert!((sample.wi - Vector3f::new(0.0, 1.0, 0.0)).length() < 1e-6);
        }
    }
}
