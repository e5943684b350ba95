// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Counted asymmetric pass
//!
//! Enumerates every directed side of one mesh against every triangle of the
//! other, accumulating intersection terms and per-side hit tallies, then
//! emits endpoint terms from the tally parities. The pass is embarrassingly
//! parallel over sides: each side owns its tally, and the per-side sums are
//! reduced through rayon's per-worker partials rather than a shared
//! accumulator. The result is deterministic up to floating point summation
//! order.

use crate::eval::terms::TermSink;
use crate::eval::{counted_endpoint_terms, counted_side_triangle, IntersectionCount};
use crate::geometry::{OrientedMesh, OrientedTriangle, TriangleSide};
use crate::real::Real;
use rayon::prelude::*;

/// One side against the whole other mesh: intersection terms plus the
/// parity-classified endpoint terms
fn side_against_mesh(
    triangles: &[OrientedTriangle],
    side: &TriangleSide,
    sink: &dyn TermSink,
) -> Real {
    let mut count = IntersectionCount::zero();
    let mut accum = 0.0;

    for triangle in triangles {
        accum += counted_side_triangle(triangle, side, &mut count, sink);
    }

    accum + counted_endpoint_terms(side, &count, sink)
}

/// Asymmetric half of the intersection volume: all sides of `sides` against
/// all triangles of `triangles`
pub(crate) fn asymmetric_pass(
    triangles: &OrientedMesh,
    sides: &OrientedMesh,
    sink: &dyn TermSink,
) -> Real {
    (0..sides.side_count())
        .into_par_iter()
        .map(|side_index| side_against_mesh(&triangles.triangles, &sides.side(side_index), sink))
        .sum()
}
