//! Scene

#![allow(dead_code)]

use crate::camera::ArcCamera;
use crate::color::Color;
use crate::common::*;
use crate::geometry::{Bounds3f, Ray};
use crate::interaction::Intersection;
use crate::light::{ArcBackgroundLight, ArcLight, BackgroundLight, BackgroundLightEval, LightSample};
use crate::sampler::Sampler;
use crate::shape::{ArcShape, Shape};

/// Number of portal teleports a single scene intersection will follow before
/// giving up, bounding the work for rays caught between two facing portals.
pub const MAX_PORTAL_FORWARDS: u32 = 16;

/// The input to the rendering algorithms: all geometry, materials, lights
/// and the camera. The scene is constructed once and read-only afterwards,
/// so it can be shared freely between worker threads.
pub struct Scene {
    /// The camera from which the image is rendered.
    camera: ArcCamera,

    /// The scene geometry, typically an acceleration structure over
    /// instances.
    root: ArcShape,

    /// The light sources available for next-event estimation. Emissive
    /// surfaces only appear here when an area light references them.
    lights: Vec<ArcLight>,

    /// An optional background light providing radiance for escaping rays.
    background: Option<ArcBackgroundLight>,
}

impl Scene {
    /// Create a new `Scene`.
    ///
    /// * `camera`     - The camera from which the image is rendered.
    /// * `root`       - The scene geometry.
    /// * `lights`     - The sampleable light sources.
    /// * `background` - An optional background light.
    pub fn new(
        camera: ArcCamera,
        root: ArcShape,
        lights: Vec<ArcLight>,
        background: Option<ArcBackgroundLight>,
    ) -> Self {
        Self {
            camera,
            root,
            lights,
            background,
        }
    }

    /// Returns the camera from which the image is rendered.
    pub fn camera(&self) -> &ArcCamera {
        &self.camera
    }

    /// Finds the closest intersection of the scene for a given ray,
    /// following portal teleports.
    ///
    /// * `ray` - The ray to intersect.
    /// * `rng` - The sampler driving stochastic intersection decisions.
    pub fn intersect(&self, ray: &Ray, rng: &mut dyn Sampler) -> Intersection {
        self.intersect_forwarded(ray, rng, MAX_PORTAL_FORWARDS)
    }

    /// Finds the closest intersection, following at most `max_forwards`
    /// portal teleports.
    ///
    /// * `ray`          - The ray to intersect.
    /// * `rng`          - The sampler driving stochastic decisions.
    /// * `max_forwards` - Maximum number of teleports to follow.
    pub fn intersect_forwarded(
        &self,
        ray: &Ray,
        rng: &mut dyn Sampler,
        max_forwards: u32,
    ) -> Intersection {
        let mut current = *ray;
        let mut its = Intersection::new(-current.direction.normalize());
        let mut forwards = 0;

        loop {
            self.root.intersect(&current, &mut its, rng);
            forwards += 1;

            match its.forward_ray.take() {
                Some(forward) if forwards < max_forwards => {
                    current = forward;
                    its = Intersection::new(-current.direction.normalize());
                }
                _ => break,
            }
        }

        its
    }

    /// Reports whether any intersection closer than `t_max` exists, used for
    /// testing the visibility of light samples.
    ///
    /// * `ray`   - The shadow ray.
    /// * `t_max` - The distance to the light sample.
    /// * `rng`   - The sampler driving stochastic decisions.
    pub fn intersect_shadow(&self, ray: &Ray, t_max: Float, rng: &mut dyn Sampler) -> bool {
        let mut its = Intersection::with_limit(-ray.direction.normalize(), t_max * (1.0 - EPSILON));
        self.root.intersect(ray, &mut its, rng)
    }

    /// Evaluates the background illumination for a direction pointing away
    /// from the scene.
    ///
    /// * `direction` - The world-space direction.
    pub fn evaluate_background(&self, direction: &crate::geometry::Vector3f) -> BackgroundLightEval {
        match &self.background {
            Some(background) => background.evaluate(direction),
            None => BackgroundLightEval {
                value: Color::BLACK,
            },
        }
    }

    /// Reports whether a background light exists.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Reports whether at least one light exists that could be sampled.
    pub fn has_lights(&self) -> bool {
        !self.lights.is_empty()
    }

    /// Randomly picks a light from the list of sampleable light sources.
    ///
    /// * `rng` - The sampler driving the selection.
    pub fn sample_light(&self, rng: &mut dyn Sampler) -> Option<LightSample> {
        if self.lights.is_empty() {
            return None;
        }
        let count = self.lights.len();
        let index = min((rng.next() * count as Float) as usize, count - 1);
        Some(LightSample {
            light: self.lights[index].clone(),
            probability: 1.0 / count as Float,
        })
    }

    /// Returns the probability of a light being picked by `sample_light`.
    pub fn light_selection_probability(&self) -> Float {
        1.0 / self.lights.len() as Float
    }

    /// Returns the bounding box of the scene geometry.
    pub fn bounds(&self) -> Bounds3f {
        self.root.bounds()
    }
}
