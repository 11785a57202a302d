//! Perspective Camera

#![allow(dead_code)]

use crate::image_plane_extents;
use lumo_core::camera::{Camera, CameraData, CameraSample};
use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Point2f, Point2i, Point3f, Ray, Transform, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// A pinhole camera with a given field of view. In local coordinates the
/// camera looks along positive z; pixels on the left of the image map to
/// negative x directions and pixels at the bottom to negative y.
pub struct PerspectiveCamera {
    /// Common camera data.
    data: CameraData,

    /// Half width of the image plane at unit distance.
    half_width: Float,

    /// Half height of the image plane at unit distance.
    half_height: Float,
}

impl PerspectiveCamera {
    /// Create a new `PerspectiveCamera`.
    ///
    /// * `props` - Construction properties (`width`, `height`, `fov`,
    ///             `fovAxis`, optional `transform` child).
    pub fn new(props: &Properties) -> Result<Self, String> {
        let resolution = Point2i::new(
            props.int_or("width", 512) as i32,
            props.int_or("height", 512) as i32,
        );
        let fov = props.require_float("fov")?;
        let fov_axis = props.string_or("fovAxis", "x");
        let transform = props
            .optional_transform("transform")
            .map(|t| (*t).clone())
            .unwrap_or_else(Transform::identity);

        Self::with_values(resolution, fov, &fov_axis, transform)
    }

    /// Create a new `PerspectiveCamera` from explicit values.
    ///
    /// * `resolution` - Image resolution in pixels.
    /// * `fov`        - Full field of view in degrees.
    /// * `fov_axis`   - The axis the field of view applies to ("x" or "y").
    /// * `transform`  - The camera-to-world transform.
    pub fn with_values(
        resolution: Point2i,
        fov: Float,
        fov_axis: &str,
        transform: Transform,
    ) -> Result<Self, String> {
        let (half_width, half_height) = image_plane_extents(fov, fov_axis, resolution)?;
        Ok(Self {
            data: CameraData::new(resolution, transform),
            half_width,
            half_height,
        })
    }
}

impl Camera for PerspectiveCamera {
    fn get_data(&self) -> &CameraData {
        &self.data
    }

    fn sample(&self, normalized: Point2f, rng: &mut dyn Sampler) -> CameraSample {
        let _ = rng;

        // Direction through the image plane point at unit distance; the
        // y-axis of normalized coordinates grows downwards on the image.
        let direction = Vector3f::new(
            normalized.x * self.half_width,
            -normalized.y * self.half_height,
            1.0,
        );

        let ray = self
            .data
            .transform
            .apply_ray(&Ray::new(Point3f::zero(), direction))
            .normalized();

        CameraSample {
            ray,
            weight: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::geometry::Point2i;
    use lumo_core::rng::Rng;

    struct StreamSampler {
        rng: Rng,
    }

    impl Sampler for StreamSampler {
        fn samples_per_pixel(&self) -> usize {
            1
        }
        fn seed(&mut self, _pixel: Point2i, _sample_index: usize) {}
        fn next(&mut self) -> Float {
            self.rng.uniform_float()
        }
        fn clone_sampler(&self) -> Box<dyn Sampler> {
            Box::new(StreamSampler { rng: Rng::new(0) })
        }
    }

    #[test]
    fn centre_ray_looks_along_positive_z() {
        let camera = PerspectiveCamera::with_values(
            Point2i::new(4, 4),
            45.0,
            "x",
            Transform::identity(),
        )
        .unwrap();
        let mut rng = StreamSampler { rng: Rng::new(1) };
        let sample = camera.sample(Point2f::zero(), &mut rng);
        assert!((sample.ray.direction - Vector3f::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert_eq!(sample.weight, Color::WHITE);
    }

    #[test]
    fn fov_bounds_the_image_plane() {
        let camera = PerspectiveCamera::with_values(
            Point2i::new(4, 4),
            90.0,
            "x",
            Transform::identity(),
        )
        .unwrap();
        let mut rng = StreamSampler { rng: Rng::new(1) };
        // The right edge of a 90° camera is 45° off axis.
        let sample = camera.sample(Point2f::new(1.0, 0.0), &mut rng);
        let d = sample.ray.direction;
        assert!((d.x - d.z).abs() < 1e-5);
    }

    #[test]
    fn unknown_fov_axis_is_rejected() {
        assert!(PerspectiveCamera::with_values(
            Point2i::new(4, 4),
            45.0,
            "z",
            Transform::identity()
        )
        .is_err());
    }

    #[test]
    fn aspect_ratio_scales_the_other_axis() {
        let camera = PerspectiveCamera::with_values(
            Point2i::new(200, 100),
            90.0,
            "x",
            Transform::identity(),
        )
        .unwrap();
        let mut rng = StreamSampler { rng: Rng::new(1) };
        let right = camera.sample(Point2f::new(1.0, 0.0), &mut rng).ray.direction;
        let top = camera.sample(Point2f::new(0.0, -1.0), &mut rng).ray.direction;
        // Half height is half of half width for a 2:1 image.
        assert!((right.x / right.z - 1.0).abs() < 1e-5);
        assert!((top.y / top.z - 0.5).abs() < 1e-5);
    }
}
