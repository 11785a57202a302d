//! Volumetric Path Tracer

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Frame, Ray};
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::interaction::Intersection;
use lumo_core::light::Light;
use lumo_core::medium::{ArcMedium, Medium};
use lumo_core::properties::Properties;
use lumo_core::reflection::BsdfSample;
use lumo_core::sampler::Sampler;
use lumo_core::scene::Scene;

/// A path tracer aware of participating media. Between surface vertices a
/// tentative scattering distance is drawn in the active medium; if it falls
/// short of the surface, a medium vertex is inserted with direct lighting
/// evaluated through medium-aware visibility. Surfaces without a BSDF are
/// pure medium boundaries: rays pass straight through them, swapping the
/// active medium according to the crossing direction.
pub struct VolumePathTracer {
    /// Common data for sampling integrators.
    data: SamplingIntegratorData,

    /// Number of path segments to trace.
    depth: usize,
}

impl VolumePathTracer {
    /// Create a new `VolumePathTracer`.
    ///
    /// * `props` - Construction properties (`depth`).
    /// * `data`  - The common sampling-integrator data.
    pub fn new(props: &Properties, data: SamplingIntegratorData) -> Self {
        Self {
            data,
            depth: props.int_or("depth", 2) as usize,
        }
    }

    /// Traces a visibility ray that passes through medium boundaries,
    /// multiplying the transmittance of every medium segment it crosses,
    /// and returns zero on the first opaque (BSDF-carrying) hit.
    ///
    /// * `scene`    - The scene.
    /// * `ray`      - The shadow ray towards the light.
    /// * `distance` - The distance to the light sample.
    /// * `medium`   - The medium active at the ray origin.
    /// * `rng`      - The sampler driving stochastic decisions.
    fn intersect_tr(
        &self,
        scene: &Scene,
        ray: &Ray,
        distance: Float,
        medium: Option<ArcMedium>,
        rng: &mut dyn Sampler,
    ) -> Float {
        let mut weight = 1.0;
        let mut active = medium;
        let mut current_ray = *ray;
        let mut remaining = distance;

        loop {
            let its = scene.intersect(&current_ray, rng);

            if !its.is_hit() || its.t > remaining {
                // Nothing opaque before the light; attenuate the final
                // segment when it still runs inside a medium.
                if let Some(active) = &active {
                    if remaining.is_finite() {
                        weight *= active.tr(&current_ray, remaining, rng);
                    } else {
                        return 0.0;
                    }
                }
                return weight;
            }

            let instance = its.instance.as_ref().unwrap();
            if instance.bsdf().is_some() {
                return 0.0;
            }

            if let Some(active) = &active {
                weight *= active.tr(&current_ray, its.t, rng);
            }

            // Crossing a boundary front face enters its medium; crossing a
            // back face returns to vacuum.
            let entering = current_ray.direction.dot(&its.surf.frame.normal) < 0.0;
            active = if entering { instance.medium() } else { None };

            remaining -= (its.surf.position - current_ray.origin).length();
            if remaining <= 0.0 {
                return weight;
            }
            current_ray = Ray::new(its.surf.position, current_ray.direction);
        }
    }

    /// Estimates direct illumination at a path vertex through medium-aware
    /// visibility. The vertex may be a surface hit or a medium scattering
    /// event (no instance attached).
    ///
    /// * `scene`  - The scene.
    /// * `its`    - The receiving path vertex.
    /// * `medium` - The medium active at the vertex.
    /// * `rng`    - The sampler driving the light selection.
    fn sample_one_light(
        &self,
        scene: &Scene,
        its: &Intersection,
        medium: Option<ArcMedium>,
        rng: &mut dyn Sampler,
    ) -> Color {
        if !scene.has_lights() {
            return Color::BLACK;
        }

        let light_sample = match scene.sample_light(rng) {
            Some(light_sample) => light_sample,
            None => return Color::BLACK,
        };

        if light_sample.light.can_be_intersected() {
            return Color::BLACK;
        }

        let direct = light_sample.light.sample_direct(its.surf.position, rng);
        if direct.weight.is_black() {
            return Color::BLACK;
        }

        let shadow_ray = Ray::new(its.surf.position, direct.wi);
        let visibility = self.intersect_tr(scene, &shadow_ray, direct.distance, medium, rng);
        if visibility == 0.0 {
            return Color::BLACK;
        }

        // At a medium vertex the phase weighting is already folded into the
        // scatter weight, so only the light term remains.
        let scatter = if its.is_hit() {
            its.evaluate_bsdf(&direct.wi).value
        } else {
            Color::WHITE
        };

        direct.weight * scatter * (visibility / light_sample.probability)
    }
}

impl SamplingIntegrator for VolumePathTracer {
    fn data(&self) -> &SamplingIntegratorData {
        &self.data
    }

    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color {
        let scene = &self.data.scene;

        let mut radiance = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut current_ray = *ray;
        let mut medium: Option<ArcMedium> = None;

        for bounce in 0..self.depth {
            let its = scene.intersect(&current_ray, rng);

            // Tentative free-flight distance in the active medium.
            let t_scatter = match &medium {
                Some(medium) => medium.sample_hit_distance(&current_ray, rng),
                None => INFINITY,
            };

            if !its.is_hit() {
                // An active medium with no boundary behind it contributes
                // nothing (media do not emit).
                if medium.is_some() {
                    break;
                }
                let background = scene.evaluate_background(&current_ray.direction).value;
                radiance += throughput * background;
                break;
            }

            if t_scatter < its.t {
                // Medium scattering event.
                let active = medium.clone().unwrap();

                let transmittance = active.tr(&current_ray, t_scatter, rng);
                let scatter_position = current_ray.at(t_scatter);

                let mut vertex = Intersection::with_limit(its.wo, t_scatter);
                vertex.surf.position = scatter_position;

                let density = active.prob_of_sampling_this_point(t_scatter);
                throughput *= active.sigma_s() * (transmittance / (density * PI));

                let light_contribution = if bounce + 1 < self.depth {
                    self.sample_one_light(scene, &vertex, medium.clone(), rng)
                } else {
                    Color::BLACK
                };
                radiance += throughput * light_contribution;

                let wi = active.sample_phase(&vertex.wo, rng);
                current_ray =
                    Ray::with_depth(scatter_position, wi.normalize(), current_ray.depth + 1);
            } else {
                // Surface scattering event.
                let has_bsdf = its
                    .instance
                    .as_ref()
                    .map(|i| i.bsdf().is_some())
                    .unwrap_or(false);

                // Boundaries without a BSDF are transparent interfaces that
                // only delimit their medium.
                let sample = if has_bsdf {
                    its.sample_bsdf(rng)
                } else {
                    BsdfSample {
                        wi: current_ray.direction.normalize(),
                        weight: Color::WHITE,
                    }
                };

                // Entering or leaving the instance swaps the active medium;
                // the sides are told apart by the shading-frame cosines.
                if !sample.is_invalid() {
                    let cos_o = Frame::cos_theta(&its.surf.frame.to_local(&its.wo));
                    let cos_i = Frame::cos_theta(&its.surf.frame.to_local(&sample.wi));
                    if cos_o < 0.0 && cos_i > 0.0 {
                        medium = None;
                    } else if cos_o > 0.0 && cos_i < 0.0 {
                        medium = its.instance.as_ref().and_then(|i| i.medium());
                    }
                }

                let emission = its.evaluate_emission();

                let light_contribution = if has_bsdf && bounce + 1 < self.depth {
                    self.sample_one_light(scene, &its, medium.clone(), rng)
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
        }

        radiance
    }
}
