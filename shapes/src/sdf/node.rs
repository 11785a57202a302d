//! SDF Node Interface

#![allow(dead_code)]

use lumo_core::autodiff::{Dual, DualVector};
use lumo_core::geometry::Bounds3f;
use std::sync::Arc;

/// One node of a composable signed-distance-function tree. Distances are
/// evaluated on dual numbers so that the same code path yields plain
/// distances during marching and gradients at the hit point.
pub trait SdfNode: Send + Sync {
    /// Returns the signed distance from a point to the surface, negative
    /// inside.
    ///
    /// * `p` - The evaluation point.
    fn distance(&self, p: &DualVector) -> Dual;

    /// Returns an axis-aligned bounding box enclosing the zero level-set.
    fn bounds(&self) -> Bounds3f;
}

/// Atomic reference counted `SdfNode`.
pub type ArcSdfNode = Arc<dyn SdfNode>;
