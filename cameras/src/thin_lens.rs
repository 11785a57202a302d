//! Thin Lens Camera

#![allow(dead_code)]

use crate::image_plane_extents;
use lumo_core::camera::{Camera, CameraData, CameraSample};
use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::geometry::{Point2f, Point2i, Point3f, Ray, Transform, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;
use lumo_core::sampling::square_to_uniform_disk;

/// A perspective camera with a finite circular aperture. Rays start on the
/// lens disk and are aimed through the focal-plane point of the pinhole
/// ray, blurring everything away from the focal distance.
pub struct ThinLensCamera {
    /// Common camera data.
    data: CameraData,

    /// Half width of the image plane at unit distance.
    half_width: Float,

    /// Half height of the image plane at unit distance.
    half_height: Float,

    /// Radius of the lens aperture.
    aperture_radius: Float,

    /// Distance of the plane in perfect focus.
    focal_distance: Float,
}

impl ThinLensCamera {
    /// Create a new `ThinLensCamera`.
    ///
    /// * `props` - Construction properties (`width`, `height`, `fov`,
    ///             `fovAxis`, `apertureRadius`, `focalDistance`, optional
    ///             `transform` child).
    pub fn new(props: &Properties) -> Result<Self, String> {
        let resolution = Point2i::new(
            props.int_or("width", 512) as i32,
            props.int_or("height", 512) as i32,
        );
        let fov = props.require_float("fov")?;
        let fov_axis = props.string_or("fovAxis", "x");
        let aperture_radius = props.require_float("apertureRadius")?;
        let focal_distance = props.require_float("focalDistance")?;
        let transform = props
            .optional_transform("transform")
            .map(|t| (*t).clone())
            .unwrap_or_else(Transform::identity);

        Self::with_values(
            resolution,
            fov,
            &fov_axis,
            aperture_radius,
            focal_distance,
            transform,
        )
    }

    /// Create a new `ThinLensCamera` from explicit values.
    #[allow(clippy::too_many_arguments)]
    pub fn with_values(
        resolution: Point2i,
        fov: Float,
        fov_axis: &str,
        aperture_radius: Float,
        focal_distance: Float,
        transform: Transform,
    ) -> Result<Self, String> {
        if focal_distance <= 0.0 {
            return Err(format!(
                "focal distance must be positive, got {focal_distance}"
            ));
        }
        let (half_width, half_height) = image_plane_extents(fov, fov_axis, resolution)?;
        Ok(Self {
            data: CameraData::new(resolution, transform),
            half_width,
            half_height,
            aperture_radius,
            focal_distance,
        })
    }
}

impl Camera for ThinLensCamera {
    fn get_data(&self) -> &CameraData {
        &self.data
    }

    fn sample(&self, normalized: Point2f, rng: &mut dyn Sampler) -> CameraSample {
        // The pinhole ray through the image plane point.
        let direction = Vector3f::new(
            normalized.x * self.half_width,
            -normalized.y * self.half_height,
            1.0,
        )
        .normalize();

        // Every ray through the lens converges at the pinhole ray's hit
        // with the focal plane.
        let t = self.focal_distance / direction.z;
        let focus = Point3f::zero() + direction * t;

        // Sample the lens disk for the new origin.
        let lens = square_to_uniform_disk(rng.next_2d()) * self.aperture_radius;
        let origin = Point3f::new(lens.x, lens.y, 0.0);

        let ray = self
            .data
            .transform
            .apply_ray(&Ray::new(origin, focus - origin))
            .normalized();

        CameraSample {
            ray,
            weight: Color::WHITE,
        }
    }
}
