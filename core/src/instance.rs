//! Instances

#![allow(dead_code)]

use crate::geometry::{Bounds3f, Frame, Normal3f, Point3f, Ray, Transform, Vector3f};
use crate::interaction::{AreaSample, Intersection, SurfaceEvent};
use crate::medium::ArcMedium;
use crate::portal::PortalLink;
use crate::reflection::ArcBsdf;
use crate::sampler::Sampler;
use crate::shape::{ArcShape, Shape};
use crate::emission::ArcEmission;
use crate::texture::{ArcTexture, Texture};
use std::sync::Arc;

/// Places a shape in the scene, attaching a transform, a material, an
/// emission, an optional normal map, an optional interior medium and an
/// optional portal link to it. Instances share their shape, so the same
/// geometry can appear multiple times under different transforms.
pub struct Instance {
    /// The shape being instanced.
    shape: ArcShape,

    /// Object-to-world transform. `None` places the shape untransformed.
    transform: Option<Arc<Transform>>,

    /// The surface material.
    bsdf: Option<ArcBsdf>,

    /// The surface emission.
    emission: Option<ArcEmission>,

    /// A tangent-space normal map perturbing the shading normal.
    normal_map: Option<ArcTexture>,

    /// The participating medium filling the interior of the shape.
    medium: Option<ArcMedium>,

    /// A portal link teleporting rays that hit this instance.
    portal: Option<Arc<PortalLink>>,

    /// Flips the shading normal to the other side of the surface.
    flip_normal: bool,
}

impl Instance {
    /// Create a new `Instance`.
    ///
    /// * `shape`       - The shape being instanced.
    /// * `transform`   - Object-to-world transform, if any.
    /// * `bsdf`        - The surface material, if any.
    /// * `emission`    - The surface emission, if any.
    /// * `normal_map`  - A tangent-space normal map, if any.
    /// * `medium`      - The interior medium, if any.
    /// * `portal`      - A portal link teleporting rays, if any.
    /// * `flip_normal` - Whether to flip the shading normal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        shape: ArcShape,
        transform: Option<Arc<Transform>>,
        bsdf: Option<ArcBsdf>,
        emission: Option<ArcEmission>,
        normal_map: Option<ArcTexture>,
        medium: Option<ArcMedium>,
        portal: Option<Arc<PortalLink>>,
        flip_normal: bool,
    ) -> Self {
        Self {
            shape,
            transform,
            bsdf,
            emission,
            normal_map,
            medium,
            portal,
            flip_normal,
        }
    }

    /// Returns the surface material of the instance.
    pub fn bsdf(&self) -> Option<ArcBsdf> {
        self.bsdf.clone()
    }

    /// Returns the surface emission of the instance.
    pub fn emission(&self) -> Option<ArcEmission> {
        self.emission.clone()
    }

    /// Returns the interior medium of the instance.
    pub fn medium(&self) -> Option<ArcMedium> {
        self.medium.clone()
    }

    /// Returns the object-to-world transform of the instance.
    pub fn transform(&self) -> Option<Arc<Transform>> {
        self.transform.clone()
    }

    /// Builds the world-space shading frame for a surface event produced by
    /// the instanced shape in local coordinates.
    ///
    /// * `surf` - The surface event to transform.
    fn transform_frame(&self, surf: &mut SurfaceEvent) {
        if let Some(transform) = &self.transform {
            surf.position = transform.apply_point(surf.position);
        }

        // A normal map replaces the shape's normal before it is brought to
        // world space: decode from [0,1] to [-1,1] and rotate out of the
        // shading frame.
        if let Some(normal_map) = &self.normal_map {
            let c = normal_map.evaluate(surf.uv);
            let n = Vector3f::new(2.0 * c.r - 1.0, 2.0 * c.g - 1.0, 2.0 * c.b - 1.0).normalize();
            surf.frame.normal = surf.frame.to_world(&n).normalize();
        }

        let mut normal = surf.frame.normal;
        if let Some(transform) = &self.transform {
            normal = Vector3f::from(transform.apply_normal(Normal3f::from(normal)));
        }
        if self.flip_normal {
            normal = -normal;
        }

        surf.frame = Frame::new(normal);
    }

    /// Intersects a world-space ray against the instanced shape and, on
    /// success, produces the world-space surface event.
    ///
    /// * `world_ray` - The ray in world coordinates.
    /// * `its`       - The intersection to update.
    /// * `rng`       - The sampler driving stochastic intersection decisions.
    pub fn intersect(&self, world_ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        let transform = match &self.transform {
            None => {
                // Fast path: local and world space coincide.
                if self.shape.intersect(world_ray, its, rng) {
                    let local_position = its.surf.position;
                    self.attach_portal(its, world_ray, local_position);
                    self.transform_frame(&mut its.surf);
                    return true;
                }
                return false;
            }
            Some(transform) => transform,
        };

        let previous_t = its.t;

        // The local ray is normalized so distances reported by the shape are
        // in local units; a previous best hit is re-expressed in those units
        // so the shape's distance comparison stays meaningful.
        let local_ray = transform.inverse_ray(world_ray).normalized();
        if its.is_hit() {
            its.t = (local_ray.origin - transform.inverse_point(its.surf.position)).length();
        }

        if self.shape.intersect(&local_ray, its, rng) {
            let local_position = its.surf.position;
            self.attach_portal(its, &local_ray, local_position);
            self.transform_frame(&mut its.surf);

            // Convert the distance back to world units.
            its.t = (its.surf.position - world_ray.origin).length();
            true
        } else {
            its.t = previous_t;
            false
        }
    }

    /// Records a forward ray when this instance is a portal surface.
    ///
    /// * `its`            - The intersection to update.
    /// * `local_ray`      - The incoming ray in local coordinates.
    /// * `local_position` - The hit position in local coordinates.
    fn attach_portal(&self, its: &mut Intersection, local_ray: &Ray, local_position: Point3f) {
        // Always reassign: a closer hit invalidates a forward ray recorded
        // by a farther portal.
        its.forward_ray = match &self.portal {
            Some(link) if link.should_teleport() => {
                link.teleported_ray(self, local_ray, local_position)
            }
            _ => None,
        };
    }

    /// Returns the world-space bounding box of the instanced shape.
    pub fn bounds(&self) -> Bounds3f {
        let transform = match &self.transform {
            None => return self.shape.bounds(),
            Some(transform) => transform,
        };

        let local = self.shape.bounds();
        if local.is_unbounded() {
            return Bounds3f::full();
        }

        let mut result = Bounds3f::empty();
        for corner in 0..8 {
            result.extend(transform.apply_point(local.corner(corner)));
        }
        result
    }

    /// Returns the world-space centroid of the instanced shape.
    pub fn centroid(&self) -> Point3f {
        match &self.transform {
            None => self.shape.centroid(),
            Some(transform) => transform.apply_point(self.shape.centroid()),
        }
    }

    /// Samples a random point on the surface of the instanced shape. The
    /// area pdf is corrected for the change of surface measure under the
    /// instance transform.
    ///
    /// * `rng` - The sampler driving the sampling decisions.
    pub fn sample_area(&self, rng: &mut dyn Sampler) -> AreaSample {
        let mut sample = self.shape.sample_area(rng);

        if let Some(transform) = &self.transform {
            // The transform maps a unit tangent patch to a parallelogram
            // whose area is the norm of the transformed axes' cross product.
            let tangent = transform.apply_vector(sample.surf.frame.tangent);
            let bitangent = transform.apply_vector(sample.surf.frame.bitangent);
            let determinant = tangent.cross(&bitangent).length();
            if determinant > 0.0 {
                sample.surf.pdf /= determinant;
                sample.area *= determinant;
            }
        }

        self.transform_frame(&mut sample.surf);
        sample
    }
}

/// Atomic reference counted `Instance`.
pub type ArcInstance = Arc<Instance>;
