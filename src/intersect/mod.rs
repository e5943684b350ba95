// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Intersection volume drivers
//!
//! The intersection volume is the sum of both asymmetric passes (sides of A
//! against triangles of B and vice versa) divided by six; the division
//! comes from the trilinear form derivation. The two passes are independent
//! and run concurrently.

mod counted;
mod localized;

pub use localized::VertexLocation;

use crate::eval::terms::{NullSink, TermSink};
use crate::geometry::OrientedMesh;
use crate::real::Real;
use counted::asymmetric_pass;
use localized::{is_inside, localized_asymmetric_pass};

/// Volume of the intersection of two closed meshes, counted variant
pub fn intersection_volume(first: &OrientedMesh, second: &OrientedMesh) -> Real {
    intersection_volume_with_sink(first, second, &NullSink)
}

/// [`intersection_volume`] reporting every generated term to `sink`
pub fn intersection_volume_with_sink(
    first: &OrientedMesh,
    second: &OrientedMesh,
    sink: &dyn TermSink,
) -> Real {
    let (forward, backward) = rayon::join(
        || asymmetric_pass(first, second, sink),
        || asymmetric_pass(second, first, sink),
    );
    (forward + backward) / 6.0
}

/// Volume of the intersection of two closed meshes, localized variant
///
/// Uses nearest-hit endpoint classification with adjacency propagation
/// instead of full line counting, and short-circuits full containment.
pub fn localized_intersection_volume(first: &OrientedMesh, second: &OrientedMesh) -> Real {
    localized_intersection_volume_with_sink(first, second, &NullSink)
}

/// [`localized_intersection_volume`] reporting every generated term to `sink`
pub fn localized_intersection_volume_with_sink(
    first: &OrientedMesh,
    second: &OrientedMesh,
    sink: &dyn TermSink,
) -> Real {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let mut accum = 0.0;

    // both passes must run and accumulate; a crossing found in either
    // direction means the surfaces intersect, so do not short-circuit
    let forward = localized_asymmetric_pass(first, second, &mut accum, sink);
    let backward = localized_asymmetric_pass(second, first, &mut accum, sink);

    if forward || backward {
        return accum / 6.0;
    }

    // no surface crossings: the meshes are nested or disjoint
    if is_inside(first, second) {
        return volume(first);
    }
    if is_inside(second, first) {
        return volume(second);
    }

    0.0
}

/// Signed volume of a single closed mesh by per-edge term evaluation
pub fn volume(mesh: &OrientedMesh) -> Real {
    mesh.volume()
}
