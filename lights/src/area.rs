//! Area Lights

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::Point3f;
use lumo_core::emission::Emission;
use lumo_core::instance::ArcInstance;
use lumo_core::light::{DirectLightSample, Light};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// A light emitting from the surface of an instance. The instance's
/// emission is evaluated at a uniformly sampled surface point; the weight
/// carries the geometric term `|cos θ_s| / (d² · pdf)` so that the
/// estimator is unbiased with respect to the solid angle at the receiver.
pub struct AreaLight {
    /// The instance whose surface emits.
    instance: ArcInstance,
}

impl AreaLight {
    /// Create a new `AreaLight`.
    ///
    /// * `props` - Construction properties (`instance` child).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            instance: props.require_instance("instance")?,
        })
    }

    /// Create a new `AreaLight` from an instance.
    ///
    /// * `instance` - The instance whose surface emits.
    pub fn with_instance(instance: ArcInstance) -> Self {
        Self { instance }
    }
}

impl Light for AreaLight {
    fn sample_direct(&self, origin: Point3f, rng: &mut dyn Sampler) -> DirectLightSample {
        let sample = self.instance.sample_area(rng);
        if sample.surf.pdf <= 0.0 {
            return DirectLightSample::invalid();
        }

        let to_light = sample.surf.position - origin;
        let distance = to_light.length();
        if distance <= EPSILON {
            return DirectLightSample::invalid();
        }
        let wi = to_light / distance;

        let emission = match self.instance.emission() {
            Some(emission) => emission,
            None => return DirectLightSample::invalid(),
        };

        // Evaluate the emission towards the receiver; the local direction
        // at the light surface points from the surface to the origin.
        let wo_local = sample.surf.frame.to_local(&-wi);
        let radiance = emission.evaluate(sample.surf.uv, &wo_local).value;

        // Change of measure from surface area to solid angle at the
        // receiver.
        let cos_at_light = wo_local.z.abs();
        let weight = radiance * (cos_at_light / (sqr(distance) * sample.surf.pdf));

        DirectLightSample {
            wi,
            weight,
            distance,
        }
    }

    /// Light-only instances are not part of the scene aggregate, so their
    /// radiance is never found by random surface hits.
    fn can_be_intersected(&self) -> bool {
        false
    }
}
