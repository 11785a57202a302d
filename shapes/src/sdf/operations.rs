//! SDF Operations

#![allow(dead_code)]

use super::node::{ArcSdfNode, SdfNode};
use lumo_core::autodiff::{Dual, DualVector};
use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Transform};
use lumo_core::properties::Properties;

/// How two distance fields are combined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CombineMode {
    Union,
    Subtract,
    Intersect,
}

/// The polynomial smooth minimum of two distances.
fn smooth_union(d1: Dual, d2: Dual, k: Float) -> Dual {
    let h = (Dual::constant(k) - (d1 - d2).abs()).max(Dual::constant(0.0));
    d1.min(d2) - h * h * (0.25 / k)
}

/// Combines two distance fields by union, subtraction or intersection, with
/// an optional smooth blend.
pub struct SdfCombine {
    first: ArcSdfNode,
    second: ArcSdfNode,
    mode: CombineMode,
    smooth: bool,
    smooth_size: Float,
}

impl SdfCombine {
    /// Create a new `SdfCombine`.
    ///
    /// * `props`    - Construction properties (`mode`, `smooth`, `k`).
    /// * `children` - Exactly two child nodes.
    pub fn new(props: &Properties, children: Vec<ArcSdfNode>) -> Result<Self, String> {
        if children.len() != 2 {
            return Err(format!(
                "exactly 2 SDFs required for 'combine', {} given",
                children.len()
            ));
        }
        let mut children = children.into_iter();
        let first = children.next().unwrap();
        let second = children.next().unwrap();

        let mode = props.enumeration(
            "mode",
            CombineMode::Union,
            &[
                ("union", CombineMode::Union),
                ("sub", CombineMode::Subtract),
                ("intersect", CombineMode::Intersect),
            ],
        )?;

        Ok(Self {
            first,
            second,
            mode,
            smooth: props.bool_or("smooth", false),
            smooth_size: props.float_or("k", 1.0),
        })
    }
}

impl SdfNode for SdfCombine {
    fn distance(&self, p: &DualVector) -> Dual {
        let left = self.first.distance(p);
        let right = self.second.distance(p);

        if self.smooth {
            let k = self.smooth_size;
            match self.mode {
                CombineMode::Union => smooth_union(left, right, k),
                CombineMode::Subtract => -smooth_union(left, -right, k),
                CombineMode::Intersect => -smooth_union(-left, -right, k),
            }
        } else {
            match self.mode {
                CombineMode::Union => left.min(right),
                CombineMode::Subtract => (-left).max(right),
                CombineMode::Intersect => left.max(right),
            }
        }
    }

    fn bounds(&self) -> Bounds3f {
        let mut bounds = Bounds3f::empty();
        bounds.extend_bounds(&self.first.bounds());
        bounds.extend_bounds(&self.second.bounds());
        bounds
    }
}

/// Offsets a distance field outward, rounding and thickening the surface.
pub struct SdfThicken {
    child: ArcSdfNode,
    amount: Float,
}

impl SdfThicken {
    /// Create a new `SdfThicken`.
    ///
    /// * `props`    - Construction properties (`amount`).
    /// * `children` - Exactly one child node.
    pub fn new(props: &Properties, children: Vec<ArcSdfNode>) -> Result<Self, String> {
        if children.len() != 1 {
            return Err(format!(
                "exactly 1 SDF required for 'thicken', {} given",
                children.len()
            ));
        }
        Ok(Self {
            child: children.into_iter().next().unwrap(),
            amount: props.require_float("amount")?,
        })
    }
}

impl SdfNode for SdfThicken {
    fn distance(&self, p: &DualVector) -> Dual {
        self.child.distance(p) - self.amount
    }

    fn bounds(&self) -> Bounds3f {
        let child = self.child.bounds();
        Bounds3f::new(
            child.p_min - lumo_core::geometry::Vector3f::splat(self.amount),
            child.p_max + lumo_core::geometry::Vector3f::splat(self.amount),
        )
    }
}

/// Evaluates a child distance field in a transformed frame. Distances only
/// remain distances under rigid motion and uniform scaling, so non-uniform
/// scales are rejected at construction.
pub struct SdfTransform {
    child: ArcSdfNode,
    transform: Transform,
    scale: Float,
}

impl SdfTransform {
    /// Create a new `SdfTransform`.
    ///
    /// * `props`    - Construction properties (`transform`).
    /// * `children` - Exactly one child node.
    pub fn new(props: &Properties, children: Vec<ArcSdfNode>) -> Result<Self, String> {
        if children.len() != 1 {
            return Err(format!(
                "exactly 1 SDF required for 'transform', {} given",
                children.len()
            ));
        }

        let transform = props
            .optional_transform("transform")
            .ok_or_else(|| String::from("missing required transform property 'transform'"))?;
        let mut transform = (*transform).clone();
        let scale = transform.pop_scale();

        if (scale.x - scale.y).abs() >= EPSILON
            || (scale.y - scale.z).abs() >= EPSILON
            || (scale.z - scale.x).abs() >= EPSILON
        {
            return Err(format!(
                "only uniform scaling is allowed for SDF transformation, given {:?}",
                scale
            ));
        }

        Ok(Self {
            child: children.into_iter().next().unwrap(),
            transform,
            scale: scale.x,
        })
    }
}

impl SdfNode for SdfTransform {
    fn distance(&self, p: &DualVector) -> Dual {
        // Bring the point into the child's local frame, evaluate at the
        // unscaled position and scale the resulting distance back.
        let local = inverse_transform_dual(&self.transform, p);
        let unscaled = local * (1.0 / self.scale);
        self.child.distance(&unscaled) * self.scale
    }

    fn bounds(&self) -> Bounds3f {
        let child = self.child.bounds();
        let mut bounds = Bounds3f::empty();
        for corner in 0..8 {
            let p = child.corner(corner) * self.scale;
            bounds.extend(self.transform.apply_point(p));
        }
        bounds
    }
}

/// Applies the inverse of a rigid transform to a dual point.
fn inverse_transform_dual(transform: &Transform, p: &DualVector) -> DualVector {
    let m = &transform.inverse_matrix4x4().m;
    DualVector::new(
        p.x * m[0][0] + p.y * m[0][1] + p.z * m[0][2] + m[0][3],
        p.x * m[1][0] + p.y * m[1][1] + p.z * m[1][2] + m[1][3],
        p.x * m[2][0] + p.y * m[2][1] + p.z * m[2][2] + m[2][3],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::SdfSphere;
    use lumo_core::geometry::{Point3f, Vector3f};
    use std::sync::Arc;

    fn distance_at(node: &dyn SdfNode, p: Point3f) -> Float {
        node.distance(&DualVector::constant(p)).v
    }

    fn sphere(radius: Float) -> ArcSdfNode {
        Arc::new(SdfSphere::new(radius))
    }

    #[test]
    fn union_takes_the_minimum() {
        let combine =
            SdfCombine::new(&Properties::new(), vec![sphere(1.0), sphere(2.0)]).unwrap();
        assert!((distance_at(&combine, Point3f::new(3.0, 0.0, 0.0)) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn subtract_carves_the_first_out_of_the_second() {
        let props = Properties::new().insert(
            "mode",
            lumo_core::properties::Value::Str("sub".into()),
        );
        let combine = SdfCombine::new(&props, vec![sphere(0.5), sphere(1.0)]).unwrap();
        // The centre lies inside the carved-out region.
        assert!(distance_at(&combine, Point3f::zero()) > 0.0);
    }

    #[test]
    fn wrong_child_count_is_rejected() {
        assert!(SdfCombine::new(&Properties::new(), vec![sphere(1.0)]).is_err());
    }

    #[test]
    fn thicken_grows_the_surface() {
        let props = Properties::new().insert(
            "amount",
            lumo_core::properties::Value::Float(0.25),
        );
        let thicken = SdfThicken::new(&props, vec![sphere(1.0)]).unwrap();
        assert!((distance_at(&thicken, Point3f::new(2.0, 0.0, 0.0)) - 0.75).abs() < 1e-5);
    }

    #[test]
    fn transform_translates_the_field() {
        let mut t = Transform::identity();
        t.translate(Vector3f::new(0.0, 3.0, 0.0));
        let props = Properties::new().insert(
            "transform",
            lumo_core::properties::Value::Transform(Arc::new(t)),
        );
        let node = SdfTransform::new(&props, vec![sphere(1.0)]).unwrap();
        assert!(distance_at(&node, Point3f::new(0.0, 3.0, 0.0)) < 0.0);
        assert!((distance_at(&node, Point3f::zero()) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn non_uniform_scale_is_rejected() {
        let mut t = Transform::identity();
        t.scale(Vector3f::new(1.0, 2.0, 1.0)).unwrap();
        let props = Properties::new().insert(
            "transform",
            lumo_core::properties::Value::Transform(Arc::new(t)),
        );
        assert!(SdfTransform::new(&props, vec![sphere(1.0)]).is_err());
    }

    #[test]
    fn uniform_scale_scales_distances() {
        let mut t = Transform::identity();
        t.scale(Vector3f::splat(2.0)).unwrap();
        let props = Properties::new().insert(
            "transform",
            lumo_core::properties::Value::Transform(Arc::new(t)),
        );
        let node = SdfTransform::new(&props, vec![sphere(1.0)]).unwrap();
        // A sphere of radius 1 scaled by 2 has its surface at radius 2.
        assert!((distance_at(&node, Point3f::new(4.0, 0.0, 0.0)) - 2.0).abs() < 1e-4);
    }
}
