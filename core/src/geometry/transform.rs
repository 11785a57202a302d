//! Transformations

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Matrix4x4, Normal3f, Point3f, Ray, Vector3f};

/// Transfers points, vectors and normals from one coordinate system to
/// another. Both the forward matrix and its inverse are kept so that either
/// direction is a single matrix multiply.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// The forward transformation matrix.
    m: Matrix4x4,

    /// The inverse transformation matrix.
    m_inv: Matrix4x4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Returns the identity transform.
    pub fn identity() -> Self {
        Self {
            m: Matrix4x4::identity(),
            m_inv: Matrix4x4::identity(),
        }
    }

    /// Returns the forward matrix.
    pub fn matrix4x4(&self) -> &Matrix4x4 {
        &self.m
    }

    /// Returns the inverse matrix.
    pub fn inverse_matrix4x4(&self) -> &Matrix4x4 {
        &self.m_inv
    }

    /// Transforms the given point (homogeneous, divided by `w`).
    ///
    /// * `p` - The point.
    pub fn apply_point(&self, p: Point3f) -> Point3f {
        transform_point(&self.m, p)
    }

    /// Transforms the given vector (linear part only).
    ///
    /// * `v` - The vector.
    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        transform_vector(&self.m, v)
    }

    /// Transforms a unit normal using the adjoint (transpose of the inverse)
    /// and renormalises, so that normals stay perpendicular under non-uniform
    /// scaling.
    ///
    /// * `n` - The unit normal.
    pub fn apply_normal(&self, n: Normal3f) -> Normal3f {
        let adjoint = self.m_inv.transpose();
        Normal3f::from(transform_vector(&adjoint, Vector3f::from(n))).normalize()
    }

    /// Transforms the given ray. The direction is intentionally not
    /// renormalised; its scaled length makes the parametric distance in the
    /// target space comparable to the source space after division by the
    /// direction length.
    ///
    /// * `ray` - The ray.
    pub fn apply_ray(&self, ray: &Ray) -> Ray {
        Ray::with_depth(
            self.apply_point(ray.origin),
            self.apply_vector(ray.direction),
            ray.depth,
        )
    }

    /// Applies the inverse transform to the given point.
    ///
    /// * `p` - The point.
    pub fn inverse_point(&self, p: Point3f) -> Point3f {
        transform_point(&self.m_inv, p)
    }

    /// Applies the inverse transform to the given vector.
    ///
    /// * `v` - The vector.
    pub fn inverse_vector(&self, v: Vector3f) -> Vector3f {
        transform_vector(&self.m_inv, v)
    }

    /// Applies the inverse transform to the given ray, without renormalising
    /// the direction.
    ///
    /// * `ray` - The ray.
    pub fn inverse_ray(&self, ray: &Ray) -> Ray {
        Ray::with_depth(
            self.inverse_point(ray.origin),
            self.inverse_vector(ray.direction),
            ray.depth,
        )
    }

    /// Appends a matrix in homogeneous coordinates to this transform.
    ///
    /// * `value` - The matrix to append.
    pub fn matrix(&mut self, value: Matrix4x4) -> Result<(), String> {
        let inv = value
            .inverse()
            .ok_or_else(|| String::from("transform is not invertible"))?;
        self.m = value * self.m;
        self.m_inv = self.m_inv * inv;
        Ok(())
    }

    /// Appends a translation to this transform.
    ///
    /// * `t` - The translation vector.
    pub fn translate(&mut self, t: Vector3f) {
        self.m = Matrix4x4::new(
            1.0, 0.0, 0.0, t.x,
            0.0, 1.0, 0.0, t.y,
            0.0, 0.0, 1.0, t.z,
            0.0, 0.0, 0.0, 1.0,
        ) * self.m;
        self.m_inv = self.m_inv
            * Matrix4x4::new(
                1.0, 0.0, 0.0, -t.x,
                0.0, 1.0, 0.0, -t.y,
                0.0, 0.0, 1.0, -t.z,
                0.0, 0.0, 0.0, 1.0,
            );
    }

    /// Appends a (potentially non-uniform) scaling to this transform. Scaling
    /// by zero along any axis is rejected as non-invertible.
    ///
    /// * `s` - The per-axis scale factors.
    pub fn scale(&mut self, s: Vector3f) -> Result<(), String> {
        if s.product() == 0.0 {
            return Err(String::from("scaling is not invertible"));
        }
        self.m = Matrix4x4::new(
            s.x, 0.0, 0.0, 0.0,
            0.0, s.y, 0.0, 0.0,
            0.0, 0.0, s.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ) * self.m;
        self.m_inv = self.m_inv
            * Matrix4x4::new(
                1.0 / s.x, 0.0, 0.0, 0.0,
                0.0, 1.0 / s.y, 0.0, 0.0,
                0.0, 0.0, 1.0 / s.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            );
        Ok(())
    }

    /// Appends a rotation of `angle` radians around the given axis using the
    /// matrix form of the Rodrigues rotation formula.
    ///
    /// * `axis`  - The rotation axis.
    /// * `angle` - The rotation angle in radians.
    pub fn rotate(&mut self, axis: Vector3f, angle: Float) {
        let u = axis.normalize();
        let cos = angle.cos();
        let sin = angle.sin();
        let one_minus_cos = 1.0 - cos;

        let rotation = Matrix4x4::new(
            cos + u.x * u.x * one_minus_cos,
            u.x * u.y * one_minus_cos - u.z * sin,
            u.x * u.z * one_minus_cos + u.y * sin,
            0.0,
            u.y * u.x * one_minus_cos + u.z * sin,
            cos + u.y * u.y * one_minus_cos,
            u.y * u.z * one_minus_cos - u.x * sin,
            0.0,
            u.z * u.x * one_minus_cos - u.y * sin,
            u.z * u.y * one_minus_cos + u.x * sin,
            cos + u.z * u.z * one_minus_cos,
            0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        self.m = rotation * self.m;
        // The inverse of a rotation is its transpose.
        self.m_inv = self.m_inv * rotation.transpose();
    }

    /// Appends a "lookat" operation, re-orienting the z-axis towards
    /// `target - origin` with the y-axis in the plane of the `up` vector.
    ///
    /// * `origin` - Position of the viewer.
    /// * `target` - Point the viewer looks at.
    /// * `up`     - Approximate up direction.
    pub fn look_at(
        &mut self,
        origin: Vector3f,
        target: Vector3f,
        up: Vector3f,
    ) -> Result<(), String> {
        let direction = (target - origin).normalize();
        if up.cross(&direction).is_zero() {
            return Err(format!(
                "lookat: direction {:?} and up vector {:?} must not be colinear",
                direction, up
            ));
        }
        let left = up.cross(&direction).normalize();
        let orthogonal_up = direction.cross(&left).normalize();

        let forward = Matrix4x4::new(
            left.x, orthogonal_up.x, direction.x, origin.x,
            left.y, orthogonal_up.y, direction.y, origin.y,
            left.z, orthogonal_up.z, direction.z, origin.z,
            0.0, 0.0, 0.0, 1.0,
        );

        // The rotation part inverts by transposition; the translation by
        // rotating the negated origin.
        let o = Vector3f::new(
            left.dot(&origin),
            orthogonal_up.dot(&origin),
            direction.dot(&origin),
        );
        let inverse = Matrix4x4::new(
            left.x, left.y, left.z, -o.x,
            orthogonal_up.x, orthogonal_up.y, orthogonal_up.z, -o.y,
            direction.x, direction.y, direction.z, -o.z,
            0.0, 0.0, 0.0, 1.0,
        );

        self.m = forward * self.m;
        self.m_inv = self.m_inv * inverse;
        Ok(())
    }

    /// Returns the determinant of the linear part of this transformation.
    pub fn determinant(&self) -> Float {
        self.m.determinant3x3()
    }

    /// Removes the per-axis scale factors from the transformation and returns
    /// them, leaving only rotation and translation behind. Used by shapes that
    /// must evaluate distances in an unscaled local frame.
    pub fn pop_scale(&mut self) -> Vector3f {
        let scale = Vector3f::new(
            column(&self.m, 0).length(),
            column(&self.m, 1).length(),
            column(&self.m, 2).length(),
        );

        for axis in 0..3 {
            let c = column(&self.m, axis).normalize();
            set_column(&mut self.m, axis, c);
            let ci = column(&self.m_inv, axis).normalize();
            set_column(&mut self.m_inv, axis, ci);
        }

        scale
    }
}

/// Applies the homogeneous point transformation for a given matrix.
fn transform_point(m: &Matrix4x4, p: Point3f) -> Point3f {
    let x = m.m[0][0] * p.x + m.m[0][1] * p.y + m.m[0][2] * p.z + m.m[0][3];
    let y = m.m[1][0] * p.x + m.m[1][1] * p.y + m.m[1][2] * p.z + m.m[1][3];
    let z = m.m[2][0] * p.x + m.m[2][1] * p.y + m.m[2][2] * p.z + m.m[2][3];
    let w = m.m[3][0] * p.x + m.m[3][1] * p.y + m.m[3][2] * p.z + m.m[3][3];
    if w == 1.0 {
        Point3f::new(x, y, z)
    } else {
        Point3f::new(x / w, y / w, z / w)
    }
}

/// Applies the linear part of a matrix to a vector.
fn transform_vector(m: &Matrix4x4, v: Vector3f) -> Vector3f {
    Vector3f::new(
        m.m[0][0] * v.x + m.m[0][1] * v.y + m.m[0][2] * v.z,
        m.m[1][0] * v.x + m.m[1][1] * v.y + m.m[1][2] * v.z,
        m.m[2][0] * v.x + m.m[2][1] * v.y + m.m[2][2] * v.z,
    )
}

/// Returns one of the first three columns of the linear part.
fn column(m: &Matrix4x4, axis: usize) -> Vector3f {
    Vector3f::new(m.m[0][axis], m.m[1][axis], m.m[2][axis])
}

/// Replaces one of the first three columns of the linear part.
fn set_column(m: &mut Matrix4x4, axis: usize, v: Vector3f) {
    m.m[0][axis] = v.x;
    m.m[1][axis] = v.y;
    m.m[2][axis] = v.z;
}
