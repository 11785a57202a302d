//! Common sampling functions.

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Point2f, Vector3f};

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to the unit disk
/// by uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn square_to_uniform_disk(u: Point2f) -> Point2f {
    // Map uniform random numbers to [-1, 1]^2.
    let offset = Point2f::new(2.0 * u.x - 1.0, 2.0 * u.y - 1.0);

    // Handle degeneracy at the origin.
    if offset.x == 0.0 && offset.y == 0.0 {
        return Point2f::zero();
    }

    // Apply concentric mapping to point.
    let (r, theta) = if offset.x.abs() > offset.y.abs() {
        (offset.x, PI / 4.0 * (offset.y / offset.x))
    } else {
        (offset.y, PI / 2.0 - PI / 4.0 * (offset.x / offset.y))
    };
    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn square_to_uniform_sphere(u: Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u.x;
    let r = safe_sqrt(1.0 - z * z);
    let phi = TWO_PI * u.y;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Uniformly sample a direction on a hemisphere around +z.
///
/// * `u` - The random sample point.
pub fn square_to_uniform_hemisphere(u: Point2f) -> Vector3f {
    let z = u.x;
    let r = safe_sqrt(1.0 - z * z);
    let phi = TWO_PI * u.y;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Sample a cosine-weighted direction on a hemisphere around +z by lifting a
/// uniformly sampled disk point onto the hemisphere.
///
/// * `u` - The random sample point.
pub fn square_to_cosine_hemisphere(u: Point2f) -> Vector3f {
    let d = square_to_uniform_disk(u);
    let z = safe_sqrt(1.0 - d.x * d.x - d.y * d.y);
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted hemisphere sampling of a direction.
///
/// * `w` - The sampled local direction.
pub fn cosine_hemisphere_pdf(w: &Vector3f) -> Float {
    max(w.z, 0.0) * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use crate::geometry::Point2f;

    fn samples(n: usize) -> impl Iterator<Item = Point2f> {
        let mut rng = Rng::new(3);
        (0..n).map(move |_| Point2f::new(rng.uniform_float(), rng.uniform_float()))
    }

    #[test]
    fn disk_samples_stay_inside_unit_circle() {
        for u in samples(1000) {
            let d = square_to_uniform_disk(u);
            assert!(d.x * d.x + d.y * d.y <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn sphere_samples_are_unit_length() {
        for u in samples(1000) {
            let w = square_to_uniform_sphere(u);
            assert!((w.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cosine_hemisphere_samples_face_up() {
        for u in samples(1000) {
            let w = square_to_cosine_hemisphere(u);
            assert!(w.z >= 0.0);
            assert!((w.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cosine_hemisphere_mean_matches_analytic() {
        // E[cos θ] for pdf cos θ / π over the hemisphere is 2/3.
        let n = 20_000;
        let mean: Float = samples(n)
            .map(|u| square_to_cosine_hemisphere(u).z)
            .sum::<Float>()
            / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01);
    }
}
