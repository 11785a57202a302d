//! Normals Integrator

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::geometry::{Ray, Vector3f};
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// A debug integrator visualising the shading normals of the first
/// intersection.
pub struct NormalsIntegrator {
    /// Common data for sampling integrators.
    data: SamplingIntegratorData,

    /// Whether to remap normals from [-1,1] to [0,1] for display.
    remap: bool,
}

impl NormalsIntegrator {
    /// Create a new `NormalsIntegrator`.
    ///
    /// * `props` - Construction properties (`remap`).
    /// * `data`  - The common sampling-integrator data.
    pub fn new(props: &Properties, data: SamplingIntegratorData) -> Self {
        Self {
            data,
            remap: props.bool_or("remap", true),
        }
    }
}

impl SamplingIntegrator for NormalsIntegrator {
    fn data(&self) -> &SamplingIntegratorData {
        &self.data
    }

    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color {
        let its = self.data.scene.intersect(ray, rng);
        if !its.is_hit() {
            return Color::BLACK;
        }

        let mut normal = its.surf.frame.normal;
        if self.remap {
            normal = (normal + Vector3f::splat(1.0)) / 2.0;
        }
        Color::from(normal)
    }
}
