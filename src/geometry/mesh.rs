// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and core geometric types
//!
//! Meshes are triangle soups: ordered sequences of oriented triangles. For
//! volume computations the mesh must be a closed oriented manifold with
//! outward winding; the kernel does not verify this, and violations produce
//! silently wrong results.

use super::BoundingBox;
use crate::eval::terms::{edge_term, NullSink};
use crate::real::Real;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle given by three vertices; `(b - a) × (c - a)` points outward
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point3<Real>,
    pub b: Point3<Real>,
    pub c: Point3<Real>,
}

impl Triangle {
    pub fn new(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Point3<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// Outward unit normal implied by the winding order
    pub fn face_normal(&self) -> Vector3<Real> {
        (self.b - self.a).cross(&(self.c - self.a)).normalize()
    }

    pub fn transform(&mut self, matrix: &Matrix4<Real>) {
        self.a = matrix.transform_point(&self.a);
        self.b = matrix.transform_point(&self.b);
        self.c = matrix.transform_point(&self.c);
    }
}

/// Triangle with its outward unit normal precomputed
///
/// Invariant: `normal == triangle.face_normal()`. Produced once per mesh by
/// [`Mesh::generate_normals`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrientedTriangle {
    pub triangle: Triangle,
    pub normal: Vector3<Real>,
}

impl OrientedTriangle {
    pub fn new(triangle: Triangle, normal: Vector3<Real>) -> Self {
        Self { triangle, normal }
    }

    /// Directed side of this triangle: index 0, 1, 2 yields
    /// (a→b, c), (b→c, a), (c→a, b)
    pub fn side(&self, index: usize) -> TriangleSide {
        let t = &self.triangle;
        let (start, end, third) = match index % 3 {
            0 => (t.a, t.b, t.c),
            1 => (t.b, t.c, t.a),
            _ => (t.c, t.a, t.b),
        };
        TriangleSide {
            segment: Segment::new(start, end),
            third,
            normal: self.normal,
        }
    }
}

/// Directed line segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3<Real>,
    pub end: Point3<Real>,
}

impl Segment {
    pub fn new(start: Point3<Real>, end: Point3<Real>) -> Self {
        Self { start, end }
    }

    /// Unnormalized direction `end - start`
    pub fn direction(&self) -> Vector3<Real> {
        self.end - self.start
    }

    /// Point at parameter `s` in the parameterization `(1-s)·start + s·end`
    pub fn point_at(&self, s: Real) -> Point3<Real> {
        Point3::from(self.start.coords.lerp(&self.end.coords, s))
    }
}

/// Directed edge of an oriented triangle, carrying the owning triangle's
/// third vertex and outward normal
///
/// The `third` vertex is not read by the evaluator; it is kept because it
/// makes orientation predicates cheap for extensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriangleSide {
    pub segment: Segment,
    pub third: Point3<Real>,
    pub normal: Vector3<Real>,
}

/// Triangle soup mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Transform all vertices by a homogeneous matrix
    pub fn transform(&mut self, matrix: &Matrix4<Real>) {
        for triangle in &mut self.triangles {
            triangle.transform(matrix);
        }
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_triangles(&self.triangles)
    }

    /// Compute per-face outward normals, producing an oriented mesh
    pub fn generate_normals(&self) -> OrientedMesh {
        OrientedMesh {
            triangles: self
                .triangles
                .iter()
                .map(|t| OrientedTriangle::new(*t, t.face_normal()))
                .collect(),
        }
    }

    /// Signed volume by the divergence theorem (sum of signed tetrahedra
    /// against the origin)
    pub fn signed_volume(&self) -> Real {
        let mut sum = 0.0;
        for t in &self.triangles {
            sum += t.a.coords.dot(&t.b.coords.cross(&t.c.coords));
        }
        sum / 6.0
    }

    /// Volume by per-edge term evaluation, computing face normals on the fly
    ///
    /// Agrees with [`Mesh::signed_volume`] on closed outward-oriented meshes;
    /// this is the same edge decomposition the intersection kernel uses.
    pub fn volume(&self) -> Real {
        let sink = NullSink;
        let mut sum = 0.0;
        for t in &self.triangles {
            let n = t.face_normal();
            sum += edge_term(&t.a, &t.b, &n, &sink)
                + edge_term(&t.b, &t.c, &n, &sink)
                + edge_term(&t.c, &t.a, &n, &sink);
        }
        sum / 6.0
    }
}

/// Mesh with per-face normals attached
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrientedMesh {
    pub triangles: Vec<OrientedTriangle>,
}

impl OrientedMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of directed sides (three per triangle)
    pub fn side_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Directed side by flat index: side `i` belongs to triangle `i / 3`
    /// and is its edge `i % 3`
    pub fn side(&self, side_index: usize) -> TriangleSide {
        self.triangles[side_index / 3].side(side_index % 3)
    }

    /// Drop the normals, recovering the underlying triangle soup
    pub fn shape(&self) -> Mesh {
        Mesh {
            triangles: self.triangles.iter().map(|t| t.triangle).collect(),
        }
    }

    /// Volume by per-edge term evaluation
    pub fn volume(&self) -> Real {
        let sink = NullSink;
        let mut sum = 0.0;
        for t in &self.triangles {
            let tri = &t.triangle;
            sum += edge_term(&tri.a, &tri.b, &t.normal, &sink)
                + edge_term(&tri.b, &tri.c, &t.normal, &sink)
                + edge_term(&tri.c, &tri.a, &t.normal, &sink);
        }
        sum / 6.0
    }
}
