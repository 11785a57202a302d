//! Path Tracer

#![allow(dead_code)]

use crate::common::sample_one_light;
use lumo_core::color::Color;
use lumo_core::geometry::Ray;
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// A multi-bounce path tracer with next-event estimation. At every vertex
/// the surface emission and one light sample are accumulated, then the path
/// continues along a BSDF sample; the light sample is suppressed at the
/// final bounce where no further vertex balances it.
pub struct PathTracer {
    /// Common data for sampling integrators.
    data: SamplingIntegratorData,

    /// Number of path segments to trace.
    depth: usize,
}

impl PathTracer {
    /// Create a new `PathTracer`.
    ///
    /// * `props` - Construction properties (`depth`).
    /// * `data`  - The common sampling-integrator data.
    pub fn new(props: &Properties, data: SamplingIntegratorData) -> Self {
        Self {
            data,
            depth: props.int_or("depth", 2) as usize,
        }
    }
}

impl SamplingIntegrator for PathTracer {
    fn data(&self) -> &SamplingIntegratorData {
        &self.data
    }

    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color {
        let scene = &self.data.scene;

        let mut radiance = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut current_ray = *ray;

        for bounce in 0..self.depth {
            let its = scene.intersect(&current_ray, rng);

            if !its.is_hit() {
                let background = scene.evaluate_background(&current_ray.direction).value;
                radiance += throughput * background;
                break;
            }

            debug!(
                "path bounce {bounce}, t = {}, throughput = {:?}",
                its.t, throughput
            );

            let sample = its.sample_bsdf(rng);

            let emission = its.evaluate_emission();

            // The final vertex gets no light sample; its own emission is
            // the only term not balanced by another bounce.
            let light_contribution = if bounce + 1 < self.depth {
                sample_one_light(scene, &its, rng, false)
            } else {
                Color::BLACK
            };

            radiance += throughput * (emission + light_contribution);

            if sample.is_invalid() {
                break;
            }
            throughput *= sample.weight;

            current_ray = Ray::with_depth(
                its.surf.position,
                sample.wi.normalize(),
                current_ray.depth + 1,
            );
        }

        radiance
    }
}
