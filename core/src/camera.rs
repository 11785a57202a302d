//! Camera Interface

#![allow(dead_code)]

use crate::color::Color;
use crate::geometry::{Point2f, Point2i, Ray, Transform};
use crate::sampler::Sampler;
use std::sync::Arc;

/// A camera ray together with its sampling weight.
#[derive(Clone, Debug)]
pub struct CameraSample {
    /// The generated world-space ray.
    pub ray: Ray,

    /// The weight of the sample.
    pub weight: Color,
}

/// Data common to all camera models.
pub struct CameraData {
    /// Image resolution in pixels.
    pub resolution: Point2i,

    /// The camera-to-world transform. In local coordinates the camera looks
    /// along positive z.
    pub transform: Transform,
}

impl CameraData {
    /// Create a new `CameraData`.
    ///
    /// * `resolution` - Image resolution in pixels.
    /// * `transform`  - The camera-to-world transform.
    pub fn new(resolution: Point2i, transform: Transform) -> Self {
        Self {
            resolution,
            transform,
        }
    }
}

/// Generates primary rays for image pixels.
pub trait Camera: Send + Sync {
    /// Returns the common camera data.
    fn get_data(&self) -> &CameraData;

    /// Returns the image resolution in pixels.
    fn resolution(&self) -> Point2i {
        self.get_data().resolution
    }

    /// Generates a ray for a point on the image plane in normalized
    /// coordinates, where both components lie in [-1, +1] and positive y
    /// points up.
    ///
    /// * `normalized` - The normalized image plane position.
    /// * `rng`        - The sampler driving stochastic lens decisions.
    fn sample(&self, normalized: Point2f, rng: &mut dyn Sampler) -> CameraSample;

    /// Generates a ray for a pixel by jittering within the pixel footprint
    /// and mapping to normalized image coordinates.
    ///
    /// * `pixel` - The pixel.
    /// * `rng`   - The sampler driving the jitter and lens decisions.
    fn sample_pixel(&self, pixel: Point2i, rng: &mut dyn Sampler) -> CameraSample {
        let resolution = self.resolution();
        let jitter = rng.next_2d();
        let normalized = Point2f::new(
            2.0 * (pixel.x as f32 + jitter.x) / resolution.x as f32 - 1.0,
            2.0 * (pixel.y as f32 + jitter.y) / resolution.y as f32 - 1.0,
        );
        self.sample(normalized, rng)
    }
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera + Send + Sync>;
