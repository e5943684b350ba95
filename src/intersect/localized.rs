// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Localized asymmetric pass
//!
//! Variant of the counted pass that classifies endpoints from a single
//! intersection (the on-segment hit nearest to the side's start) instead of
//! counting the whole supporting line, then spreads the classification to
//! untouched vertices along the mesh's vertex adjacency. Sides that never
//! hit the other mesh inherit their endpoints' status from neighbors that
//! did; vertices no flood reaches stay unknown and contribute no endpoint
//! term.

use crate::eval::solver::solve_intersection;
use crate::eval::terms::{endpoint_terms, TermSink};
use crate::eval::{localized_side_triangle, LocalizedIntersectionCount};
use crate::geometry::{adjacency, OrientedMesh, OrientedTriangle, TriangleSide};
use crate::real::{Real, UNIFY_DIGITS};
use rayon::prelude::*;
use std::collections::VecDeque;

/// Inside/outside status of a unified vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLocation {
    Unknown,
    Inside,
    Outside,
}

/// One side against the whole other mesh: intersection terms plus, when the
/// side was hit at all, the derived endpoint classification
fn localized_side_against_mesh(
    triangles: &[OrientedTriangle],
    side: &TriangleSide,
    sink: &dyn TermSink,
) -> (Real, Option<(VertexLocation, VertexLocation)>) {
    let mut count = LocalizedIntersectionCount::zero();
    let mut accum = 0.0;

    for triangle in triangles {
        accum += localized_side_triangle(triangle, side, &mut count, sink);
    }

    // no intersections on the segment, nothing to classify
    if count.on_segment == 0 {
        return (accum, None);
    }

    let location = |inside| {
        if inside {
            VertexLocation::Inside
        } else {
            VertexLocation::Outside
        }
    };
    (
        accum,
        Some((location(count.start_inside), location(count.end_inside()))),
    )
}

fn assign_location(locations: &mut [VertexLocation], index: usize, location: VertexLocation) {
    let previous = locations[index];
    if previous != VertexLocation::Unknown && previous != location {
        #[cfg(feature = "consistency-checks")]
        panic!("inconsistent inside/outside classification for unified vertex {index}");

        #[cfg(not(feature = "consistency-checks"))]
        log::warn!(
            "conflicting classification for unified vertex {index}: {previous:?} vs {location:?}, keeping the newer"
        );
    }
    locations[index] = location;
}

/// Complete the vertex classification by flooding `Inside` along the
/// adjacency graph; `Outside` vertices never change and never propagate
fn propagate_inside(locations: &mut [VertexLocation], adjacency: &[Vec<usize>]) {
    let mut visited = vec![false; locations.len()];
    let mut queue = VecDeque::new();

    for start in 0..locations.len() {
        queue.clear();
        queue.push_back(start);

        while let Some(vertex) = queue.pop_front() {
            if visited[vertex] {
                continue;
            }
            if locations[vertex] != VertexLocation::Inside {
                continue;
            }
            visited[vertex] = true;

            for &neighbor in &adjacency[vertex] {
                if locations[neighbor] != VertexLocation::Unknown {
                    continue;
                }
                locations[neighbor] = VertexLocation::Inside;
                queue.push_back(neighbor);
            }
        }
    }
}

/// Localized asymmetric half: accumulates into `volume` and reports whether
/// any side of `sides` actually crossed `triangles`
pub(crate) fn localized_asymmetric_pass(
    triangles: &OrientedMesh,
    sides: &OrientedMesh,
    volume: &mut Real,
    sink: &dyn TermSink,
) -> bool {
    let (unified_vertices, unified_indices) = sides.unify_vertices(UNIFY_DIGITS);
    let mut locations = vec![VertexLocation::Unknown; unified_vertices.len()];

    // per-side evaluation runs in parallel; the classification writes are
    // applied afterwards in side order so that conflicts resolve
    // deterministically
    let outcomes: Vec<(Real, Option<(VertexLocation, VertexLocation)>)> = (0..sides.side_count())
        .into_par_iter()
        .map(|side_index| {
            localized_side_against_mesh(&triangles.triangles, &sides.side(side_index), sink)
        })
        .collect();

    let mut accum = 0.0;
    for (side_index, (terms, classification)) in outcomes.into_iter().enumerate() {
        accum += terms;
        if let Some((start_location, end_location)) = classification {
            let tri = side_index / 3;
            let edge = side_index % 3;
            assign_location(&mut locations, unified_indices[3 * tri + edge], start_location);
            assign_location(
                &mut locations,
                unified_indices[3 * tri + (edge + 1) % 3],
                end_location,
            );
        }
    }

    let classified = locations
        .iter()
        .filter(|&&l| l != VertexLocation::Unknown)
        .count();
    if classified == 0 {
        return false;
    }
    log::debug!(
        "localized pass classified {classified} of {} unified vertices directly",
        locations.len()
    );

    let graph = adjacency(unified_vertices.len(), &unified_indices);
    propagate_inside(&mut locations, &graph);

    // second sweep: endpoint terms from the completed classification
    accum += (0..sides.side_count())
        .into_par_iter()
        .map(|side_index| {
            let tri = side_index / 3;
            let edge = side_index % 3;
            let start_inside =
                locations[unified_indices[3 * tri + edge]] == VertexLocation::Inside;
            let end_inside =
                locations[unified_indices[3 * tri + (edge + 1) % 3]] == VertexLocation::Inside;
            endpoint_terms(&sides.side(side_index), start_inside, end_inside, sink)
        })
        .sum::<Real>();

    *volume += accum;
    true
}

/// Parity containment test: shoot the supporting line of the inner mesh's
/// first side and count hits behind the segment across the outer mesh
pub(crate) fn is_inside(inner: &OrientedMesh, outer: &OrientedMesh) -> bool {
    let side = inner.side(0);

    let before = outer
        .triangles
        .iter()
        .filter(|triangle| {
            matches!(
                solve_intersection(&triangle.triangle, &side.segment),
                Some(scalar) if scalar < 0.0
            )
        })
        .count();

    before % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::terms::NullSink;
    use crate::geometry::Primitive;
    use nalgebra::{Matrix4, Vector3};

    #[test]
    fn test_propagation_floods_inside_only() {
        // path graph 0 - 1 - 2 - 3, vertex 0 inside, vertex 3 outside
        let adjacency = vec![vec![1], vec![0, 2], vec![1, 3], vec![2]];
        let mut locations = vec![
            VertexLocation::Inside,
            VertexLocation::Unknown,
            VertexLocation::Unknown,
            VertexLocation::Outside,
        ];
        propagate_inside(&mut locations, &adjacency);

        assert_eq!(locations[1], VertexLocation::Inside);
        assert_eq!(locations[2], VertexLocation::Inside);
        assert_eq!(locations[3], VertexLocation::Outside);
    }

    #[test]
    fn test_propagation_leaves_unreachable_unknown() {
        // two components; only the first has an inside seed
        let adjacency = vec![vec![1], vec![0], vec![3], vec![2]];
        let mut locations = vec![
            VertexLocation::Inside,
            VertexLocation::Unknown,
            VertexLocation::Unknown,
            VertexLocation::Unknown,
        ];
        propagate_inside(&mut locations, &adjacency);

        assert_eq!(locations[1], VertexLocation::Inside);
        assert_eq!(locations[2], VertexLocation::Unknown);
        assert_eq!(locations[3], VertexLocation::Unknown);
    }

    #[test]
    fn test_outside_never_propagates() {
        let adjacency = vec![vec![1], vec![0]];
        let mut locations = vec![VertexLocation::Outside, VertexLocation::Unknown];
        propagate_inside(&mut locations, &adjacency);
        assert_eq!(locations[1], VertexLocation::Unknown);
    }

    #[test]
    fn test_containment_parity() {
        // keep the tetrahedron off the cube's face diagonals so the ray
        // test crosses face interiors, not triangulation seams
        let mut tetra = Primitive::tetrahedron().to_mesh();
        tetra.transform(&Matrix4::new_translation(&Vector3::new(0.1, 0.2, 0.3)));
        let tetra = tetra.generate_normals();
        let cube = Primitive::cube(Vector3::repeat(10.0), true)
            .to_mesh()
            .generate_normals();

        assert!(is_inside(&tetra, &cube));
        assert!(!is_inside(&cube, &tetra));
    }

    #[test]
    fn test_disjoint_is_not_contained() {
        let cube = Primitive::unit_cube().to_mesh().generate_normals();
        let mut far = Primitive::unit_cube().to_mesh();
        far.transform(&Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0)));
        let far = far.generate_normals();

        assert!(!is_inside(&cube, &far));
        assert!(!is_inside(&far, &cube));
    }

    #[test]
    fn test_pass_reports_no_crossing_for_disjoint_meshes() {
        let cube = Primitive::unit_cube().to_mesh().generate_normals();
        let mut far = Primitive::unit_cube().to_mesh();
        far.transform(&Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0)));
        let far = far.generate_normals();

        let mut volume = 0.0;
        assert!(!localized_asymmetric_pass(&cube, &far, &mut volume, &NullSink));
        assert_eq!(volume, 0.0);
    }
}
