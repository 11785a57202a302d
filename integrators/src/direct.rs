//! Direct Illumination Integrator

#![allow(dead_code)]

use crate::common::sample_one_light;
use lumo_core::color::Color;
use lumo_core::geometry::Ray;
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::sampler::Sampler;

/// Estimates one bounce of illumination: the emission at the first hit,
/// next-event estimation from one light, and a single BSDF sample towards
/// either the background or an emissive surface.
pub struct DirectIntegrator {
    /// Common data for sampling integrators.
    data: SamplingIntegratorData,
}

impl DirectIntegrator {
    /// Create a new `DirectIntegrator`.
    ///
    /// * `data` - The common sampling-integrator data.
    pub fn new(data: SamplingIntegratorData) -> Self {
        Self { data }
    }
}

impl SamplingIntegrator for DirectIntegrator {
    fn data(&self) -> &SamplingIntegratorData {
        &self.data
    }

    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color {
        let scene = &self.data.scene;

        let its = scene.intersect(ray, rng);
        if !its.is_hit() {
            return scene.evaluate_background(&ray.direction).value;
        }

        let emission = its.evaluate_emission();
        let light_contribution = sample_one_light(scene, &its, rng, true);

        // One BSDF sample estimates the radiance arriving over the
        // hemisphere: either the background or the emission of whatever
        // surface the secondary ray finds.
        let mut sample = its.sample_bsdf(rng);
        if !sample.is_invalid() {
            let secondary = Ray::new(its.surf.position, sample.wi.normalize());
            let its2 = scene.intersect(&secondary, rng);
            if its2.is_hit() {
                sample.weight *= its2.evaluate_emission();
            } else {
                sample.weight *= scene.evaluate_background(&secondary.direction).value;
            }
        }

        sample.weight + emission + light_contribution
    }
}
