//! Bounding Volume Hierarchy.

#![allow(dead_code)]

use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Point3f, Ray};
use lumo_core::interaction::Intersection;
use lumo_core::sampler::Sampler;

/// Maximum number of primitives stored in a leaf node.
const MAX_PRIMS_IN_NODE: usize = 4;

/// Traversal stack depth. A binary tree over `2^62` primitives would be
/// needed to exceed this.
const MAX_TRAVERSAL_DEPTH: usize = 64;

/// An indexed collection of primitives that a BVH can be built over and
/// traversed against. Both the scene-level aggregate of instances and
/// triangle meshes implement this, so hierarchies nest: the traversal has no
/// global state and re-enters itself when an instance holds its own tree.
pub trait PrimitiveSet: Send + Sync {
    /// Returns the number of primitives in the collection.
    fn primitive_count(&self) -> usize;

    /// Returns the bounding box of one primitive.
    ///
    /// * `index` - The primitive index.
    fn primitive_bounds(&self, index: usize) -> Bounds3f;

    /// Returns the centroid of one primitive.
    ///
    /// * `index` - The primitive index.
    fn primitive_centroid(&self, index: usize) -> Point3f;

    /// Intersects a ray against one primitive, strengthening `its` on
    /// success.
    ///
    /// * `index` - The primitive index.
    /// * `ray`   - The ray to intersect.
    /// * `its`   - The intersection to update.
    /// * `rng`   - The sampler driving stochastic intersection decisions.
    fn intersect_primitive(
        &self,
        index: usize,
        ray: &Ray,
        its: &mut Intersection,
        rng: &mut dyn Sampler,
    ) -> bool;
}

/// A node of the flattened hierarchy. Internal nodes store the index of
/// their second child (the first child immediately follows the node);
/// leaves store a contiguous run of primitive indices.
#[derive(Copy, Clone, Debug, Default)]
struct BvhNode {
    /// Union bounds of the subtree.
    bounds: Bounds3f,

    /// Second-child index for internal nodes; first primitive offset for
    /// leaves.
    offset: u32,

    /// Number of primitives in a leaf, zero for internal nodes.
    count: u16,
}

/// A binary bounding volume hierarchy over primitive indices. Construction
/// is deterministic for a given input order: nodes are split at the median
/// of the longest axis of the centroid bounds.
pub struct Bvh {
    /// Flattened nodes in depth-first order.
    nodes: Vec<BvhNode>,

    /// Primitive indices, permuted so leaves cover contiguous runs.
    indices: Vec<u32>,
}

impl Bvh {
    /// Builds a hierarchy over a primitive collection.
    ///
    /// * `primitives` - The collection to build over.
    pub fn build<P: PrimitiveSet + ?Sized>(primitives: &P) -> Self {
        let count = primitives.primitive_count();
        let mut indices: Vec<u32> = (0..count as u32).collect();
        let mut nodes = Vec::with_capacity(2 * count);

        if count > 0 {
            let bounds: Vec<Bounds3f> = (0..count).map(|i| primitives.primitive_bounds(i)).collect();
            let centroids: Vec<Point3f> =
                (0..count).map(|i| primitives.primitive_centroid(i)).collect();
            build_recursive(&bounds, &centroids, &mut indices, &mut nodes, 0, count);
        }

        debug!(
            "BVH created with {} nodes for {} primitives",
            nodes.len(),
            count
        );

        Self { nodes, indices }
    }

    /// Returns the bounds of the whole hierarchy.
    pub fn bounds(&self) -> Bounds3f {
        self.nodes.first().map_or_else(Bounds3f::empty, |n| n.bounds)
    }

    /// Finds the closest intersection among the primitives. Traversal is
    /// ordered front to back; the far child of a node is pruned when its
    /// entry distance exceeds the best hit found so far.
    ///
    /// * `primitives` - The collection the hierarchy was built over.
    /// * `ray`        - The ray to intersect.
    /// * `its`        - The intersection to update.
    /// * `rng`        - The sampler driving stochastic decisions.
    pub fn intersect<P: PrimitiveSet + ?Sized>(
        &self,
        primitives: &P,
        ray: &Ray,
        its: &mut Intersection,
        rng: &mut dyn Sampler,
    ) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut hit = false;
        let mut stack = [(0_u32, 0.0 as Float); MAX_TRAVERSAL_DEPTH];
        let mut stack_size = 0;

        let entry = self.nodes[0].bounds.intersect(ray);
        if entry < its.t {
            stack[0] = (0, entry);
            stack_size = 1;
        }

        while stack_size > 0 {
            stack_size -= 1;
            let (node_index, entry) = stack[stack_size];
            // The best hit may have improved since this node was pushed.
            if entry >= its.t {
                continue;
            }

            let node = self.nodes[node_index as usize];
            if node.count > 0 {
                let start = node.offset as usize;
                for &primitive in &self.indices[start..start + node.count as usize] {
                    hit |= primitives.intersect_primitive(primitive as usize, ray, its, rng);
                }
            } else {
                let near_index = node_index + 1;
                let far_index = node.offset;
                let mut near = (near_index, self.nodes[near_index as usize].bounds.intersect(ray));
                let mut far = (far_index, self.nodes[far_index as usize].bounds.intersect(ray));
                if far.1 < near.1 {
                    std::mem::swap(&mut near, &mut far);
                }
                // Push the far child first so the near child is visited next.
                if far.1 < its.t {
                    stack[stack_size] = far;
                    stack_size += 1;
                }
                if near.1 < its.t {
                    stack[stack_size] = near;
                    stack_size += 1;
                }
            }
        }

        hit
    }
}

/// Recursively builds the node for `indices[start..end]`, returning its
/// index. Children follow their parent in depth-first order.
fn build_recursive(
    bounds: &[Bounds3f],
    centroids: &[Point3f],
    indices: &mut Vec<u32>,
    nodes: &mut Vec<BvhNode>,
    start: usize,
    end: usize,
) -> usize {
    let node_index = nodes.len();
    nodes.push(BvhNode::default());

    let mut node_bounds = Bounds3f::empty();
    for &i in &indices[start..end] {
        node_bounds.extend_bounds(&bounds[i as usize]);
    }

    let count = end - start;
    let mut make_leaf = count <= MAX_PRIMS_IN_NODE;

    if !make_leaf {
        // Median split on the longest axis of the centroid bounds.
        let mut centroid_bounds = Bounds3f::empty();
        for &i in &indices[start..end] {
            centroid_bounds.extend(centroids[i as usize]);
        }
        let axis = centroid_bounds.max_extent_axis();

        if centroid_bounds.diagonal()[axis] <= 0.0 {
            // All centroids coincide; splitting cannot make progress.
            make_leaf = true;
        } else {
            indices[start..end].sort_unstable_by(|&a, &b| {
                let ca = centroids[a as usize][axis];
                let cb = centroids[b as usize][axis];
                ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
            });
            let mid = start + count / 2;
            build_recursive(bounds, centroids, indices, nodes, start, mid);
            let right = build_recursive(bounds, centroids, indices, nodes, mid, end);
            nodes[node_index] = BvhNode {
                bounds: node_bounds,
                offset: right as u32,
                count: 0,
            };
        }
    }

    if make_leaf {
        nodes[node_index] = BvhNode {
            bounds: node_bounds,
            offset: start as u32,
            count: count as u16,
        };
    }

    node_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::geometry::Vector3f;
    use lumo_core::rng::Rng;
    use lumo_core::sampler::Sampler;
    use lumo_core::geometry::{Frame, Point2f, Point2i};
    use lumo_core::interaction::Intersection;

    /// A sampler that is never actually consulted by the test primitives.
    struct NullSampler;

    impl Sampler for NullSampler {
        fn samples_per_pixel(&self) -> usize {
            1
        }
        fn seed(&mut self, _pixel: Point2i, _sample_index: usize) {}
        fn next(&mut self) -> Float {
            0.5
        }
        fn next_2d(&mut self) -> Point2f {
            Point2f::new(0.5, 0.5)
        }
        fn clone_sampler(&self) -> Box<dyn Sampler> {
            Box::new(NullSampler)
        }
    }

    /// A soup of spheres with analytic intersections.
    struct Spheres {
        centers: Vec<Point3f>,
        radius: Float,
    }

    impl Spheres {
        fn random(count: usize, seed: u64) -> Self {
            let mut rng = Rng::new(seed);
            let centers = (0..count)
                .map(|_| {
                    Point3f::new(
                        10.0 * rng.uniform_float() - 5.0,
                        10.0 * rng.uniform_float() - 5.0,
                        10.0 * rng.uniform_float() - 5.0,
                    )
                })
                .collect();
            Self {
                centers,
                radius: 0.25,
            }
        }
    }

    impl PrimitiveSet for Spheres {
        fn primitive_count(&self) -> usize {
            self.centers.len()
        }

        fn primitive_bounds(&self, index: usize) -> Bounds3f {
            let c = self.centers[index];
            let r = Vector3f::splat(self.radius);
            Bounds3f::new(c - r, c + r)
        }

        fn primitive_centroid(&self, index: usize) -> Point3f {
            self.centers[index]
        }

        fn intersect_primitive(
            &self,
            index: usize,
            ray: &Ray,
            its: &mut Intersection,
            _rng: &mut dyn Sampler,
        ) -> bool {
            let center = self.centers[index];
            let to_origin = ray.origin - center;
            let b = 2.0 * ray.direction.dot(&to_origin);
            let c = to_origin.length_squared() - self.radius * self.radius;
            let d = b * b - 4.0 * c;
            if d < 0.0 {
                return false;
            }
            let t0 = (-b - d.sqrt()) / 2.0;
            let t1 = (-b + d.sqrt()) / 2.0;
            let t = if t0 > EPSILON { t0 } else { t1 };
            if t < EPSILON || t > its.t {
                return false;
            }
            its.t = t;
            its.surf.position = ray.at(t);
            its.surf.frame = Frame::new((its.surf.position - center).normalize());
            true
        }
    }

    fn linear_scan(spheres: &Spheres, ray: &Ray) -> (Float, Point3f) {
        let mut its = Intersection::new(-ray.direction);
        let mut rng = NullSampler;
        for i in 0..spheres.primitive_count() {
            spheres.intersect_primitive(i, ray, &mut its, &mut rng);
        }
        (its.t, its.surf.position)
    }

    #[test]
    fn traversal_matches_linear_scan() {
        let spheres = Spheres::random(500, 9);
        let bvh = Bvh::build(&spheres);
        let mut ray_rng = Rng::new(1234);
        let mut rng = NullSampler;

        for _ in 0..1000 {
            let origin = Point3f::new(
                20.0 * ray_rng.uniform_float() - 10.0,
                20.0 * ray_rng.uniform_float() - 10.0,
                20.0 * ray_rng.uniform_float() - 10.0,
            );
            let direction = Vector3f::new(
                2.0 * ray_rng.uniform_float() - 1.0,
                2.0 * ray_rng.uniform_float() - 1.0,
                2.0 * ray_rng.uniform_float() - 1.0,
            );
            if direction.length() < 1e-3 {
                continue;
            }
            let ray = Ray::new(origin, direction.normalize());

            let mut its = Intersection::new(-ray.direction);
            bvh.intersect(&spheres, &ray, &mut its, &mut rng);
            let (expected_t, expected_p) = linear_scan(&spheres, &ray);

            assert_eq!(its.t, expected_t);
            if expected_t.is_finite() {
                assert_eq!(its.surf.position, expected_p);
            }
        }
    }

    #[test]
    fn empty_set_reports_no_hit() {
        let spheres = Spheres {
            centers: vec![],
            radius: 1.0,
        };
        let bvh = Bvh::build(&spheres);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let mut its = Intersection::new(-ray.direction);
        assert!(!bvh.intersect(&spheres, &ray, &mut its, &mut NullSampler));
    }
}
