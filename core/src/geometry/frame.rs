//! Shading Frames

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::Vector3f;

/// An orthonormal coordinate frame at a surface point. Local directions are
/// expressed such that the normal is the z-axis and `cos θ` of a direction is
/// simply its z-component.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    /// First frame axis.
    pub tangent: Vector3f,

    /// Second frame axis.
    pub bitangent: Vector3f,

    /// Third frame axis, the surface normal.
    pub normal: Vector3f,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            tangent: Vector3f::new(1.0, 0.0, 0.0),
            bitangent: Vector3f::new(0.0, 1.0, 0.0),
            normal: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}

impl Frame {
    /// Builds an orthonormal frame around a unit normal using the branchless
    /// construction of Duff et al.
    ///
    /// * `normal` - The unit surface normal.
    pub fn new(normal: Vector3f) -> Self {
        let sign = sign(normal.z);
        let a = -1.0 / (sign + normal.z);
        let b = normal.x * normal.y * a;
        Self {
            tangent: Vector3f::new(1.0 + sign * normal.x * normal.x * a, sign * b, -sign * normal.x),
            bitangent: Vector3f::new(b, sign + normal.y * normal.y * a, -normal.y),
            normal,
        }
    }

    /// Creates a frame from explicit axes. The caller is responsible for
    /// providing an orthonormal set.
    ///
    /// * `tangent`   - First frame axis.
    /// * `bitangent` - Second frame axis.
    /// * `normal`    - Third frame axis.
    pub fn from_axes(tangent: Vector3f, bitangent: Vector3f, normal: Vector3f) -> Self {
        Self {
            tangent,
            bitangent,
            normal,
        }
    }

    /// Rotates a world-space direction into the local frame.
    ///
    /// * `w` - The world-space direction.
    pub fn to_local(&self, w: &Vector3f) -> Vector3f {
        Vector3f::new(w.dot(&self.tangent), w.dot(&self.bitangent), w.dot(&self.normal))
    }

    /// Rotates a local direction into world space.
    ///
    /// * `w` - The local direction.
    pub fn to_world(&self, w: &Vector3f) -> Vector3f {
        self.tangent * w.x + self.bitangent * w.y + self.normal * w.z
    }

    /// Returns the cosine of the angle between a local direction and the
    /// surface normal.
    ///
    /// * `w` - The local direction.
    pub fn cos_theta(w: &Vector3f) -> Float {
        w.z
    }

    /// Returns the absolute cosine of the angle between a local direction and
    /// the surface normal.
    ///
    /// * `w` - The local direction.
    pub fn abs_cos_theta(w: &Vector3f) -> Float {
        w.z.abs()
    }

    /// Returns the largest deviation of the frame from orthonormality. Useful
    /// for validation in debug builds and tests.
    pub fn orthonormality_error(&self) -> Float {
        let mut err: Float = 0.0;
        err = max(err, (self.tangent.length() - 1.0).abs());
        err = max(err, (self.bitangent.length() - 1.0).abs());
        err = max(err, (self.normal.length() - 1.0).abs());
        err = max(err, self.tangent.dot(&self.bitangent).abs());
        err = max(err, self.bitangent.dot(&self.normal).abs());
        err = max(err, self.normal.dot(&self.tangent).abs());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn frame_axes_are_right_handed() {
        let frame = Frame::new(Vector3f::new(0.0, 0.0, 1.0));
        let cross = frame.tangent.cross(&frame.bitangent);
        assert!((cross - frame.normal).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn frame_is_orthonormal(
            x in -1.0f32..1.0,
            y in -1.0f32..1.0,
            z in -1.0f32..1.0,
        ) {
            let v = Vector3f::new(x, y, z);
            prop_assume!(v.length() > 1e-3);
            let frame = Frame::new(v.normalize());
            prop_assert!(frame.orthonormality_error() < 1e-4);
        }

        #[test]
        fn local_world_roundtrip(
            nx in -1.0f32..1.0,
            ny in -1.0f32..1.0,
            nz in -1.0f32..1.0,
            wx in -1.0f32..1.0,
            wy in -1.0f32..1.0,
            wz in -1.0f32..1.0,
        ) {
            let n = Vector3f::new(nx, ny, nz);
            prop_assume!(n.length() > 1e-3);
            let frame = Frame::new(n.normalize());
            let w = Vector3f::new(wx, wy, wz);
            let roundtrip = frame.to_world(&frame.to_local(&w));
            prop_assert!((roundtrip - w).length() < 1e-4);
        }
    }
}
