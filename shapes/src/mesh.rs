//! Triangle Meshes

#![allow(dead_code)]

use lumo_accel::{Bvh, PrimitiveSet};
use lumo_core::common::*;
use lumo_core::geometry::{Bounds3f, Frame, Point2f, Point3f, Ray, Vector2f, Vector3f};
use lumo_core::interaction::Intersection;
use lumo_core::sampler::Sampler;
use lumo_core::shape::Shape;

/// A single vertex of a triangle mesh.
#[derive(Copy, Clone, Debug)]
pub struct Vertex {
    /// Vertex position.
    pub position: Point3f,

    /// Vertex normal.
    pub normal: Vector3f,

    /// Vertex texture coordinates.
    pub uv: Point2f,
}

impl Vertex {
    /// Create a new `Vertex`.
    ///
    /// * `position` - Vertex position.
    /// * `normal`   - Vertex normal.
    /// * `uv`       - Vertex texture coordinates.
    pub fn new(position: Point3f, normal: Vector3f, uv: Point2f) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Interpolates three vertices at barycentric coordinates, linearly in
    /// position, normal and texture coordinates.
    ///
    /// * `bary` - The barycentric coordinates (u, v); the weight of the
    ///            first vertex is 1-u-v.
    /// * `v0`   - First vertex.
    /// * `v1`   - Second vertex.
    /// * `v2`   - Third vertex.
    pub fn interpolate(bary: Vector2f, v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vertex {
        let alpha = 1.0 - bary.x - bary.y;
        Vertex {
            position: Point3f::from(
                Vector3f::from(v0.position) * alpha
                    + Vector3f::from(v1.position) * bary.x
                    + Vector3f::from(v2.position) * bary.y,
            ),
            normal: v0.normal * alpha + v1.normal * bary.x + v2.normal * bary.y,
            uv: Point2f::new(
                v0.uv.x * alpha + v1.uv.x * bary.x + v2.uv.x * bary.y,
                v0.uv.y * alpha + v1.uv.y * bary.x + v2.uv.y * bary.y,
            ),
        }
    }
}

/// A shape consisting of potentially many triangles sharing an index and a
/// vertex buffer, accelerated by its own bounding volume hierarchy. Loading
/// mesh files is an external concern; the mesh is built from buffers.
pub struct TriangleMesh {
    /// The index buffer; each element is one triangle.
    triangles: Vec<[u32; 3]>,

    /// The vertex buffer, indexed by `triangles`.
    vertices: Vec<Vertex>,

    /// Whether to interpolate shading normals from the vertices, or report
    /// the geometric face normal instead.
    smooth: bool,

    /// The hierarchy over the triangles.
    bvh: Bvh,
}

impl TriangleMesh {
    /// Create a new `TriangleMesh`.
    ///
    /// * `vertices`  - The vertex buffer.
    /// * `triangles` - The index buffer; each element is one triangle.
    /// * `smooth`    - Whether to interpolate shading normals.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<[u32; 3]>, smooth: bool) -> Self {
        let mut mesh = Self {
            triangles,
            vertices,
            smooth,
            bvh: Bvh::build(&Empty),
        };
        mesh.bvh = Bvh::build(&mesh);
        info!(
            "built mesh with {} triangles, {} vertices",
            mesh.triangles.len(),
            mesh.vertices.len()
        );
        mesh
    }

    fn triangle(&self, index: usize) -> (&Vertex, &Vertex, &Vertex) {
        let [i0, i1, i2] = self.triangles[index];
        (
            &self.vertices[i0 as usize],
            &self.vertices[i1 as usize],
            &self.vertices[i2 as usize],
        )
    }
}

struct Empty;

impl PrimitiveSet for Empty {
    fn primitive_count(&self) -> usize {
        0
    }
    fn primitive_bounds(&self, _index: usize) -> Bounds3f {
        Bounds3f::empty()
    }
    fn primitive_centroid(&self, _index: usize) -> Point3f {
        Point3f::zero()
    }
    fn intersect_primitive(
        &self,
        _index: usize,
        _ray: &Ray,
        _its: &mut Intersection,
        _rng: &mut dyn Sampler,
    ) -> bool {
        false
    }
}

impl PrimitiveSet for TriangleMesh {
    fn primitive_count(&self) -> usize {
        self.triangles.len()
    }

    fn primitive_bounds(&self, index: usize) -> Bounds3f {
        let (v0, v1, v2) = self.triangle(index);
        let mut bounds = Bounds3f::empty();
        bounds.extend(v0.position);
        bounds.extend(v1.position);
        bounds.extend(v2.position);
        bounds
    }

    fn primitive_centroid(&self, index: usize) -> Point3f {
        let (v0, v1, v2) = self.triangle(index);
        Point3f::from(
            (Vector3f::from(v0.position)
                + Vector3f::from(v1.position)
                + Vector3f::from(v2.position))
                / 3.0,
        )
    }

    /// Möller-Trumbore ray/triangle intersection.
    fn intersect_primitive(
        &self,
        index: usize,
        ray: &Ray,
        its: &mut Intersection,
        _rng: &mut dyn Sampler,
    ) -> bool {
        let (v0, v1, v2) = self.triangle(index);

        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let h = ray.direction.cross(&edge2);
        let det = edge1.dot(&h);

        // Parallel rays cannot intersect the triangle plane.
        if det > -EPSILON && det < EPSILON {
            return false;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - v0.position;
        let u = inv_det * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(&edge1);
        let v = inv_det * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = inv_det * edge2.dot(&q);
        if t < EPSILON || t > its.t {
            return false;
        }

        its.t = t;
        its.surf.position = ray.at(t);

        let interpolated = Vertex::interpolate(Vector2f::new(u, v), v0, v1, v2);
        its.surf.uv = interpolated.uv;

        let normal = if self.smooth {
            interpolated.normal.normalize()
        } else {
            edge1.cross(&edge2).normalize()
        };

        // Orthogonalise the first edge against the shading normal to obtain
        // a tangent; fall back to a canonical frame for degenerate edges.
        let tangent = edge1 - normal * normal.dot(&edge1);
        if tangent.length_squared() < EPSILON * EPSILON {
            its.surf.frame = Frame::new(normal);
        } else {
            let tangent = tangent.normalize();
            let bitangent = normal.cross(&tangent).normalize();
            its.surf.frame = Frame::from_axes(tangent, bitangent, normal);
        }

        its.surf.pdf = 0.0;
        true
    }
}

impl Shape for TriangleMesh {
    fn intersect(&self, ray: &Ray, its: &mut Intersection, rng: &mut dyn Sampler) -> bool {
        self.bvh.intersect(self, ray, its, rng)
    }

    fn bounds(&self) -> Bounds3f {
        self.bvh.bounds()
    }

    fn centroid(&self) -> Point3f {
        self.bounds().centroid()
    }
}
