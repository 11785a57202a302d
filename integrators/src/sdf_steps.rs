//! SDF Step Integrator

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::geometry::Ray;
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::sampler::Sampler;

/// A debug integrator visualising the fraction of the ray-marching step
/// budget consumed by SDF intersections.
pub struct SdfIntegrator {
    /// Common data for sampling integrators.
    data: SamplingIntegratorData,
}

impl SdfIntegrator {
    /// Create a new `SdfIntegrator`.
    ///
    /// * `data` - The common sampling-integrator data.
    pub fn new(data: SamplingIntegratorData) -> Self {
        Self { data }
    }
}

impl SamplingIntegrator for SdfIntegrator {
    fn data(&self) -> &SamplingIntegratorData {
        &self.data
    }

    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color {
        let its = self.data.scene.intersect(ray, rng);
        if !its.is_hit() {
            return Color::BLACK;
        }
        Color::gray(its.stats.sdf_step_fraction)
    }
}
