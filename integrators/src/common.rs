//! Shared estimator pieces.

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::geometry::Ray;
use lumo_core::interaction::Intersection;
use lumo_core::light::Light;
use lumo_core::sampler::Sampler;
use lumo_core::scene::Scene;

/// Estimates the direct illumination at a surface hit by sampling one
/// uniformly chosen light and shadow-testing it. Lights whose radiance is
/// also found by random surface hits are skipped to avoid counting them
/// twice.
///
/// * `scene`        - The scene.
/// * `its`          - The receiving surface hit.
/// * `rng`          - The sampler driving the light selection.
/// * `check_facing` - Reject lights behind the shading normal outright
///                    (one-sided surfaces).
pub(crate) fn sample_one_light(
    scene: &Scene,
    its: &Intersection,
    rng: &mut dyn Sampler,
    check_facing: bool,
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

    if check_facing && direct.wi.dot(&its.surf.frame.normal) < 0.0 {
        return Color::BLACK;
    }

    // Occlusion test up to the light sample.
    let shadow_ray = Ray::new(its.surf.position, direct.wi);
    if scene.intersect_shadow(&shadow_ray, direct.distance, rng) {
        return Color::BLACK;
    }

    let bsdf = its.evaluate_bsdf(&direct.wi);
    direct.weight * bsdf.value / light_sample.probability
}
