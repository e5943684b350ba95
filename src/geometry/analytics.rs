// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::{BoundingBox, Mesh};
use crate::real::{Real, UNIFY_DIGITS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometry statistics and analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Volume by the per-edge term decomposition
    pub volume: Real,
    /// Signed volume by the divergence theorem
    pub signed_volume: Real,
    /// Total surface area
    pub surface_area: Real,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [Real; 6],
    /// Number of triangles
    pub triangle_count: usize,
    /// Number of unique vertices after unification
    pub unique_vertex_count: usize,
    /// Is the mesh watertight (every edge shared by exactly two triangles)?
    pub is_watertight: bool,
}

impl GeometryStats {
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            signed_volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            triangle_count: 0,
            unique_vertex_count: 0,
            is_watertight: false,
        }
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    if mesh.is_empty() {
        return GeometryStats::empty();
    }

    let bbox = mesh.bounding_box();
    let (vertices, indices) = mesh.unify_vertices(UNIFY_DIGITS);

    GeometryStats {
        volume: mesh.volume(),
        signed_volume: mesh.signed_volume(),
        surface_area: surface_area(mesh),
        bbox: flatten_bbox(&bbox),
        triangle_count: mesh.triangle_count(),
        unique_vertex_count: vertices.len(),
        is_watertight: check_watertight(&indices),
    }
}

fn flatten_bbox(bbox: &BoundingBox) -> [Real; 6] {
    [
        bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
    ]
}

fn surface_area(mesh: &Mesh) -> Real {
    let mut area = 0.0;
    for t in &mesh.triangles {
        area += (t.b - t.a).cross(&(t.c - t.a)).norm() / 2.0;
    }
    area
}

/// A mesh is watertight if every undirected edge is shared by exactly two
/// triangles (the closed-manifold contract the volume kernel assumes)
fn check_watertight(indices: &[usize]) -> bool {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for triangle in indices.chunks_exact(3) {
        for i in 0..3 {
            let from = triangle[i];
            let to = triangle[(i + 1) % 3];
            let edge = if from < to { (from, to) } else { (to, from) };
            *edge_count.entry(edge).or_insert(0) += 1;
        }
    }

    edge_count.values().all(|&count| count == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_analyze_cube() {
        let mesh = Primitive::cube(Vector3::repeat(10.0), true).to_mesh();
        let stats = analyze(&mesh);

        assert_relative_eq!(stats.volume, 1000.0, epsilon = 5e-2);
        assert_relative_eq!(stats.signed_volume, 1000.0, epsilon = 5e-2);
        assert_relative_eq!(stats.surface_area, 600.0, epsilon = 5e-2);
        assert_eq!(stats.triangle_count, 12);
        assert_eq!(stats.unique_vertex_count, 8);
        assert!(stats.is_watertight);
    }

    #[test]
    fn test_open_mesh_is_not_watertight() {
        let mut mesh = Primitive::tetrahedron().to_mesh();
        mesh.triangles.pop();
        let stats = analyze(&mesh);
        assert!(!stats.is_watertight);
    }

    #[test]
    fn test_analyze_empty_mesh() {
        let stats = analyze(&Mesh::empty());
        assert_eq!(stats.volume, 0.0);
        assert_eq!(stats.triangle_count, 0);
    }
}
