//! SDF Primitives

#![allow(dead_code)]

use super::node::SdfNode;
use lumo_core::autodiff::{Dual, DualVector};
use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Point3f};
use lumo_core::properties::Properties;

/// A sphere centred at the origin.
pub struct SdfSphere {
    /// The radius of the sphere.
    radius: Float,
}

impl SdfSphere {
    /// Create a new `SdfSphere`.
    ///
    /// * `radius` - The radius of the sphere.
    pub fn new(radius: Float) -> Self {
        Self { radius }
    }

    /// Create a new `SdfSphere` from properties.
    pub fn from_props(props: &Properties) -> Self {
        Self::new(props.float_or("radius", 1.0))
    }
}

impl SdfNode for SdfSphere {
    fn distance(&self, p: &DualVector) -> Dual {
        p.length() - self.radius
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(
            Point3f::splat(-self.radius),
            Point3f::splat(self.radius),
        )
    }
}

/// An axis-aligned box centred at the origin.
pub struct SdfBox {
    /// The corner defining the half extent in each direction.
    corner: Point3f,
}

impl SdfBox {
    /// Create a new `SdfBox`.
    ///
    /// * `corner` - The corner defining the half extent in each direction.
    pub fn new(corner: Point3f) -> Self {
        Self { corner }
    }

    /// Create a new `SdfBox` from properties.
    pub fn from_props(props: &Properties) -> Self {
        Self::new(props.point_or("corner", Point3f::new(1.0, 1.0, 1.0)))
    }
}

impl SdfNode for SdfBox {
    fn distance(&self, p: &DualVector) -> Dual {
        let zero = Dual::constant(0.0);
        let qx = p.x.abs() - self.corner.x;
        let qy = p.y.abs() - self.corner.y;
        let qz = p.z.abs() - self.corner.z;

        let outside = DualVector::new(qx.max(zero), qy.max(zero), qz.max(zero)).length();
        let inside = qx.max(qy.max(qz)).min(zero);
        outside + inside
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(
            Point3f::new(-self.corner.x, -self.corner.y, -self.corner.z),
            self.corner,
        )
    }
}

/// A capped cylinder around the y-axis.
pub struct SdfCylinder {
    /// Half height of the cylinder.
    height: Float,

    /// Radius of the cylinder.
    radius: Float,
}

impl SdfCylinder {
    /// Create a new `SdfCylinder`.
    ///
    /// * `height` - Half height of the cylinder.
    /// * `radius` - Radius of the cylinder.
    pub fn new(height: Float, radius: Float) -> Self {
        Self { height, radius }
    }

    /// Create a new `SdfCylinder` from properties.
    pub fn from_props(props: &Properties) -> Self {
        Self::new(props.float_or("height", 1.0), props.float_or("radius", 1.0))
    }
}

impl SdfNode for SdfCylinder {
    fn distance(&self, p: &DualVector) -> Dual {
        let zero = Dual::constant(0.0);

        // Radial and axial distances to the cylinder boundary.
        let dx = (p.x * p.x + p.z * p.z).sqrt() - self.radius;
        let dy = p.y.abs() - self.height;

        let inside = dx.max(dy).min(zero);
        let ox = dx.max(zero);
        let oy = dy.max(zero);
        let outside = (ox * ox + oy * oy).sqrt();
        inside + outside
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(
            Point3f::new(-self.radius, -self.height, -self.radius),
            Point3f::new(self.radius, self.height, self.radius),
        )
    }
}

/// The mandelbulb fractal, estimated by the usual orbit derivative bound.
pub struct SdfMandelbulb {
    /// Exponent of the iteration.
    power: Float,

    /// Number of iterations of the orbit.
    iterations: usize,

    /// Escape radius of the orbit.
    bailout: Float,
}

impl SdfMandelbulb {
    /// Create a new `SdfMandelbulb`.
    ///
    /// * `power`      - Exponent of the iteration.
    /// * `iterations` - Number of iterations of the orbit.
    /// * `bailout`    - Escape radius of the orbit.
    pub fn new(power: Float, iterations: usize, bailout: Float) -> Self {
        Self {
            power,
            iterations,
            bailout,
        }
    }

    /// Create a new `SdfMandelbulb` from properties.
    pub fn from_props(props: &Properties) -> Self {
        Self::new(
            props.float_or("power", 8.0),
            props.int_or("iterations", 5) as usize,
            props.float_or("bailout", 1.15),
        )
    }
}

impl SdfNode for SdfMandelbulb {
    fn distance(&self, p: &DualVector) -> Dual {
        let mut z = *p;
        let mut dr = Dual::constant(1.0);
        let mut r = Dual::constant(0.0);

        for _ in 0..self.iterations {
            r = z.length();
            if r.v > self.bailout {
                break;
            }

            // Convert to polar coordinates.
            let theta = (z.z / r).acos();
            let phi = z.y.atan2(z.x);
            dr = r.powf(self.power - 1.0) * self.power * dr + Dual::constant(1.0);

            // Scale and rotate the point.
            let zr = r.powf(self.power);
            let theta = theta * self.power;
            let phi = phi * self.power;

            // Convert back to cartesian coordinates.
            z = DualVector::new(
                zr * (theta.sin() * phi.cos()),
                zr * (phi.sin() * theta.sin()),
                zr * theta.cos(),
            ) + *p;
        }

        // Guard the origin where the orbit radius vanishes.
        let r = r.max(Dual::constant(1e-9));
        r.ln() * r / dr * 0.5
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::new(Point3f::splat(-1.5), Point3f::splat(1.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_at(node: &dyn SdfNode, p: Point3f) -> Float {
        node.distance(&DualVector::constant(p)).v
    }

    #[test]
    fn sphere_distances() {
        let s = SdfSphere::new(1.0);
        assert!((distance_at(&s, Point3f::new(0.0, 2.0, 0.0)) - 1.0).abs() < 1e-5);
        assert!((distance_at(&s, Point3f::zero()) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn box_distance_on_face_and_corner() {
        let b = SdfBox::new(Point3f::new(1.0, 1.0, 1.0));
        assert!((distance_at(&b, Point3f::new(2.0, 0.0, 0.0)) - 1.0).abs() < 1e-5);
        let corner = distance_at(&b, Point3f::new(2.0, 2.0, 2.0));
        assert!((corner - (3.0 as Float).sqrt()).abs() < 1e-4);
        assert!(distance_at(&b, Point3f::zero()) < 0.0);
    }

    #[test]
    fn cylinder_distance() {
        let c = SdfCylinder::new(1.0, 0.5);
        assert!((distance_at(&c, Point3f::new(1.5, 0.0, 0.0)) - 1.0).abs() < 1e-5);
        assert!((distance_at(&c, Point3f::new(0.0, 2.0, 0.0)) - 1.0).abs() < 1e-5);
        assert!(distance_at(&c, Point3f::zero()) < 0.0);
    }

    #[test]
    fn sphere_gradient_is_outward() {
        let s = SdfSphere::new(1.0);
        let d = s.distance(&DualVector::variable(Point3f::new(0.0, 0.0, 3.0)));
        assert!((d.dz - 1.0).abs() < 1e-4);
        assert!(d.dx.abs() < 1e-4 && d.dy.abs() < 1e-4);
    }

    #[test]
    fn mandelbulb_is_finite_everywhere() {
        let m = SdfMandelbulb::new(8.0, 5, 1.15);
        for p in [
            Point3f::zero(),
            Point3f::new(0.5, 0.2, -0.3),
            Point3f::new(2.0, 0.0, 0.0),
        ] {
            let d = distance_at(&m, p);
            assert!(d.is_finite());
        }
    }
}
