//! Portal Links

#![allow(dead_code)]

use crate::geometry::{Point3f, Ray, Transform};
use crate::instance::Instance;
use std::sync::{Arc, RwLock, Weak};

/// One end of a portal link.
struct PortalEnd {
    /// The instance acting as the portal surface. Weak to avoid a reference
    /// cycle with the instance owning the link.
    instance: Weak<Instance>,

    /// The local-to-world transform of the portal surface.
    transform: Option<Arc<Transform>>,
}

/// Connects two instances so that rays hitting one of them continue from the
/// other. The link is registered once at scene build time and read-only
/// afterwards.
#[derive(Default)]
pub struct PortalLink {
    ends: RwLock<Vec<PortalEnd>>,
}

impl PortalLink {
    /// Creates an empty portal link.
    pub fn new() -> Self {
        Self {
            ends: RwLock::new(Vec::with_capacity(2)),
        }
    }

    /// Registers an instance as one end of the link. A link holds exactly
    /// two portals; registering a third is a construction error.
    ///
    /// * `instance`  - The instance acting as the portal surface.
    /// * `transform` - The local-to-world transform of the portal surface.
    pub fn register(
        &self,
        instance: &Arc<Instance>,
        transform: Option<Arc<Transform>>,
    ) -> Result<(), String> {
        let mut ends = self
            .ends
            .write()
            .map_err(|_| String::from("portal link lock poisoned"))?;
        if ends.len() >= 2 {
            return Err(String::from(
                "a third instance tried to register itself with a portal link, \
                 which can only hold two linked portals",
            ));
        }
        ends.push(PortalEnd {
            instance: Arc::downgrade(instance),
            transform,
        });
        Ok(())
    }

    /// Reports whether a hit on the portal surface should teleport the ray.
    pub fn should_teleport(&self) -> bool {
        true
    }

    /// Computes the ray that exits the linked portal for a ray entering at
    /// `from`. Origin and direction are given in the local space of the
    /// entered portal; the result is in world space. Returns `None` when the
    /// link is not fully registered.
    ///
    /// * `from`      - The instance that was hit.
    /// * `local_ray` - The incoming ray in the hit portal's local space.
    /// * `origin`    - The hit position in the hit portal's local space.
    pub fn teleported_ray(&self, from: &Instance, local_ray: &Ray, origin: Point3f) -> Option<Ray> {
        let ends = self.ends.read().ok()?;
        if ends.len() != 2 {
            warn!("portal link is not fully registered; ray passes through");
            return None;
        }

        let destination = if std::ptr::eq(ends[0].instance.as_ptr(), from as *const Instance) {
            &ends[1]
        } else if std::ptr::eq(ends[1].instance.as_ptr(), from as *const Instance) {
            &ends[0]
        } else {
            warn!("teleported_ray called with an instance that is not part of this link");
            return None;
        };

        let ray = match &destination.transform {
            Some(transform) => Ray::with_depth(
                transform.apply_point(origin),
                transform.apply_vector(local_ray.direction).normalize(),
                local_ray.depth + 1,
            ),
            None => Ray::with_depth(
                origin,
                local_ray.direction.normalize(),
                local_ray.depth + 1,
            ),
        };
        Some(ray)
    }
}
