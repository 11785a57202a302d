//! Point Lights

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::Point3f;
use lumo_core::light::{DirectLightSample, Light};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// An infinitesimally small light radiating a given power uniformly into
/// all directions.
pub struct PointLight {
    /// The power (flux) emitted by the light.
    power: Color,

    /// The position of the light.
    position: Point3f,
}

impl PointLight {
    /// Create a new `PointLight`.
    ///
    /// * `props` - Construction properties (`power`, `position`).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            power: props.require_color("power")?,
            position: props.require_point("position")?,
        })
    }

    /// Create a new `PointLight` from explicit values.
    ///
    /// * `power`    - The power (flux) emitted by the light.
    /// * `position` - The position of the light.
    pub fn with_values(power: Color, position: Point3f) -> Self {
        Self { power, position }
    }
}

impl Light for PointLight {
    fn sample_direct(&self, origin: Point3f, rng: &mut dyn Sampler) -> DirectLightSample {
        let _ = rng;
        let to_light = self.position - origin;
        let distance = to_light.length();

        // Power spreads over the full sphere, so the intensity is the
        // power divided by 4π, falling off with the squared distance.
        let intensity = self.power * INV_FOUR_PI;

        DirectLightSample {
            wi: to_light / distance,
            weight: intensity / sqr(distance),
            distance,
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
    fn inverse_square_falloff() {
        let light = PointLight::with_values(Color::gray(4.0 * PI), Point3f::new(0.0, 2.0, 0.0));
        let mut rng = StreamSampler::new(1);
        let sample = light.sample_direct(Point3f::zero(), &mut rng);
        assert!((sample.distance - 2.0).abs() < 1e-5);
        // power/(4π d²) = 1/4.
        assert!((sample.weight.r - 0.25).abs() < 1e-5);
        assert!((sample.wi - lumo_core::geometry::Vector3f::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }
}
