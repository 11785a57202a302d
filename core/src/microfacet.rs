//! GGX Microfacet Distribution

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Frame, Point2f, Vector3f};

/// Evaluates the isotropic GGX normal distribution for a micro-normal.
/// Returns zero for micro-normals below the horizon.
///
/// * `alpha`  - Roughness parameter of the distribution.
/// * `normal` - The micro-normal in the shading frame.
pub fn evaluate_ggx(alpha: Float, normal: &Vector3f) -> Float {
    let cos_theta = Frame::cos_theta(normal);
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let cos2 = cos_theta * cos_theta;
    let tail = cos2 * (sqr(alpha) - 1.0) + 1.0;
    sqr(alpha) / (PI * sqr(tail))
}

/// Evaluates the Smith masking term for a single direction, i.e. the
/// fraction of microfacets with normal `m` that are visible from `w`.
///
/// * `alpha` - Roughness parameter of the distribution.
/// * `m`     - The micro-normal in the shading frame.
/// * `w`     - The direction in the shading frame.
pub fn smith_g1(alpha: Float, m: &Vector3f, w: &Vector3f) -> Float {
    let cos_theta = Frame::cos_theta(w);
    // Sidedness agreement between the macro and micro normal.
    if w.dot(m) * cos_theta <= 0.0 {
        return 0.0;
    }
    let cos2 = sqr(cos_theta);
    let tan2 = max(0.0, (1.0 - cos2) / cos2);
    2.0 / (1.0 + (1.0 + sqr(alpha) * tan2).sqrt())
}

/// Samples a micro-normal from the GGX distribution of visible normals as
/// seen from `wo`, following the spherical-cap construction of Heitz.
///
/// * `alpha` - Roughness parameter of the distribution.
/// * `wo`    - The observer direction in the shading frame.
/// * `u`     - The random sample point.
pub fn sample_ggx_vndf(alpha: Float, wo: &Vector3f, u: Point2f) -> Vector3f {
    // Stretch the view direction into the hemisphere configuration of a
    // roughness-one distribution.
    let wh = Vector3f::new(alpha * wo.x, alpha * wo.y, wo.z).normalize();

    // Orthonormal basis around the stretched view direction.
    let len_sq = wh.x * wh.x + wh.y * wh.y;
    let t1 = if len_sq > 0.0 {
        Vector3f::new(-wh.y, wh.x, 0.0) / len_sq.sqrt()
    } else {
        Vector3f::new(1.0, 0.0, 0.0)
    };
    let t2 = wh.cross(&t1);

    // Sample a disk point, re-projected onto the visible cap.
    let r = u.x.sqrt();
    let phi = TWO_PI * u.y;
    let p1 = r * phi.cos();
    let mut p2 = r * phi.sin();
    let s = 0.5 * (1.0 + wh.z);
    p2 = (1.0 - s) * safe_sqrt(1.0 - p1 * p1) + s * p2;
    let p3 = safe_sqrt(1.0 - p1 * p1 - p2 * p2);

    let nh = t1 * p1 + t2 * p2 + wh * p3;

    // Un-stretch back to the original roughness.
    Vector3f::new(alpha * nh.x, alpha * nh.y, max(0.0, nh.z)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;

    #[test]
    fn ndf_is_zero_below_horizon() {
        let m = Vector3f::new(0.0, 0.5, -0.5).normalize();
        assert_eq!(evaluate_ggx(0.3, &m), 0.0);
    }

    #[test]
    fn smith_g1_bounded_by_one() {
        let mut rng = Rng::new(11);
        let m = Vector3f::new(0.0, 0.0, 1.0);
        for _ in 0..1000 {
            let w = crate::sampling::square_to_uniform_hemisphere(Point2f::new(
                rng.uniform_float(),
                rng.uniform_float(),
            ));
            let g = smith_g1(0.4, &m, &w);
            assert!((0.0..=1.0).contains(&g));
        }
    }

    #[test]
    fn vndf_samples_lie_in_upper_hemisphere() {
        let mut rng = Rng::new(5);
        let wo = Vector3f::new(0.3, -0.2, 0.9).normalize();
        for _ in 0..1000 {
            let m = sample_ggx_vndf(
                0.25,
                &wo,
                Point2f::new(rng.uniform_float(), rng.uniform_float()),
            );
            assert!(m.z > 0.0);
            assert!((m.length() - 1.0).abs() < 1e-4);
            // A visible normal faces the observer.
            assert!(wo.dot(&m) >= 0.0);
        }
    }
}
