// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Test-solid generators
//!
//! Closed, outward-wound triangle soups used by the test suite, the
//! benchmarks, and callers who want a quick reference solid. Arbitrary
//! placement goes through [`crate::geometry::Mesh::transform`].

use super::{Mesh, Triangle};
use crate::real::Real;
use nalgebra::{Point3, Vector3};

/// Geometric primitives
pub enum Primitive {
    Cube { size: Vector3<Real>, center: bool },
    Tetrahedron,
}

// Outward-wound unit cube on [0, 1]^3, two triangles per face
const CUBE_VERTICES: [[[Real; 3]; 3]; 12] = [
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
    [[1.0, 1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    [[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
    [[1.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
    [[0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]],
    [[0.0, 1.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
    [[1.0, 1.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
    [[1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    [[1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    [[1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]],
    [[1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
];

// Outward-wound unit right tetrahedron with legs along the axes
const TETRAHEDRON_VERTICES: [[[Real; 3]; 3]; 4] = [
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
];

impl Primitive {
    /// Axis-aligned cube on [0, size] per axis, or centered at the origin
    pub fn cube(size: Vector3<Real>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    /// Axis-aligned unit cube on [0, 1]^3
    pub fn unit_cube() -> Self {
        Self::Cube {
            size: Vector3::repeat(1.0),
            center: false,
        }
    }

    /// Unit right tetrahedron {(0,0,0), (1,0,0), (0,1,0), (0,0,1)},
    /// volume 1/6
    pub fn tetrahedron() -> Self {
        Self::Tetrahedron
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Tetrahedron => soup(&TETRAHEDRON_VERTICES),
        }
    }
}

fn soup(vertices: &[[[Real; 3]; 3]]) -> Mesh {
    Mesh::from_triangles(
        vertices
            .iter()
            .map(|t| {
                Triangle::new(
                    Point3::new(t[0][0], t[0][1], t[0][2]),
                    Point3::new(t[1][0], t[1][1], t[1][2]),
                    Point3::new(t[2][0], t[2][1], t[2][2]),
                )
            })
            .collect(),
    )
}

fn generate_cube_mesh(size: Vector3<Real>, center: bool) -> Mesh {
    let offset = if center { -size / 2.0 } else { Vector3::zeros() };
    let mut mesh = soup(&CUBE_VERTICES);
    for triangle in &mut mesh.triangles {
        for vertex in [&mut triangle.a, &mut triangle.b, &mut triangle.c] {
            vertex.x = vertex.x * size.x + offset.x;
            vertex.y = vertex.y * size.y + offset.y;
            vertex.z = vertex.z * size.z + offset.z;
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_is_closed_and_unit() {
        let mesh = Primitive::unit_cube().to_mesh();
        assert_eq!(mesh.triangle_count(), 12);
        assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_centered_cube_bbox() {
        let mesh = Primitive::cube(Vector3::new(2.0, 4.0, 6.0), true).to_mesh();
        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.min.x, -1.0, epsilon = 1e-3);
        assert_relative_eq!(bbox.max.y, 2.0, epsilon = 1e-3);
        assert_relative_eq!(bbox.max.z, 3.0, epsilon = 1e-3);
        assert_relative_eq!(mesh.signed_volume(), 48.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tetrahedron_volume() {
        let mesh = Primitive::tetrahedron().to_mesh();
        assert_eq!(mesh.triangle_count(), 4);
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-3);
    }

    #[test]
    fn test_normals_point_outward() {
        // every face normal of a convex solid points away from its vertex centroid
        for primitive in [Primitive::cube(Vector3::repeat(1.0), true), Primitive::Tetrahedron] {
            let mesh = primitive.to_mesh();
            let mut centroid = Vector3::zeros();
            for triangle in &mesh.triangles {
                centroid += triangle.a.coords + triangle.b.coords + triangle.c.coords;
            }
            let centroid = Point3::from(centroid / (3.0 * mesh.triangle_count() as Real));
            for triangle in &mesh.triangles {
                let face_center = Point3::from(
                    (triangle.a.coords + triangle.b.coords + triangle.c.coords) / 3.0,
                );
                assert!(triangle.face_normal().dot(&(face_center - centroid)) > 0.0);
            }
        }
    }
}
