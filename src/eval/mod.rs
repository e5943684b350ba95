// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation module - the per-side, per-triangle intersection primitives
//!
//! Everything here is branch-local state plus pure arithmetic: one
//! accumulator per directed side, no allocation, no shared mutation. That
//! layout is what makes the passes embarrassingly parallel over sides (and
//! what a data-parallel accelerator port would index by `(side, triangle)`).

pub mod solver;
pub mod terms;

use crate::geometry::{OrientedTriangle, TriangleSide};
use crate::real::Real;
use solver::solve_intersection;
use terms::{endpoint_terms, intersection_terms, TermSink};

/// Per-side intersection tally for the counted pass
///
/// Counts hits of the side's supporting line against the other mesh, split
/// by where on the line they fall. Consumed once to classify the side's
/// endpoints by parity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionCount {
    /// Hits at parameter `s < 0`
    pub before_segment: u32,
    /// Hits at parameter `0 ≤ s ≤ 1`
    pub on_segment: u32,
}

impl IntersectionCount {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Even/odd ray test for the segment start: a point is inside a closed
    /// mesh iff the line behind it crosses the surface an odd number of times
    pub fn start_inside(&self) -> bool {
        self.before_segment % 2 == 1
    }

    /// Even/odd ray test for the segment end
    pub fn end_inside(&self) -> bool {
        (self.before_segment + self.on_segment) % 2 == 1
    }
}

/// Per-side tally for the localized pass
///
/// Instead of counting the full line, records the geometry of the on-segment
/// hit nearest to the start; that single hit decides the start's
/// inside/outside status.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedIntersectionCount {
    /// Hits at parameter `0 ≤ s ≤ 1`
    pub on_segment: u32,
    /// Whether the nearest hit faces the start from inside
    pub start_inside: bool,
    /// Smallest on-segment parameter observed so far
    pub closest: Real,
}

impl LocalizedIntersectionCount {
    pub fn zero() -> Self {
        Self {
            on_segment: 0,
            start_inside: false,
            closest: Real::INFINITY,
        }
    }

    /// Parity-derived status of the segment end
    pub fn end_inside(&self) -> bool {
        self.start_inside ^ (self.on_segment % 2 == 1)
    }
}

impl Default for LocalizedIntersectionCount {
    fn default() -> Self {
        Self::zero()
    }
}

/// Intersect one side with one triangle for the counted pass
///
/// Updates the side's tally and returns the term contribution of the hit
/// (zero when the hit is off the segment or dropped as degenerate).
pub fn counted_side_triangle(
    triangle: &OrientedTriangle,
    side: &TriangleSide,
    count: &mut IntersectionCount,
    sink: &dyn TermSink,
) -> Real {
    let Some(scalar) = solve_intersection(&triangle.triangle, &side.segment) else {
        return 0.0;
    };

    if scalar > 1.0 {
        return 0.0;
    }

    if scalar < 0.0 {
        count.before_segment += 1;
        return 0.0;
    }

    count.on_segment += 1;

    let point = side.segment.point_at(scalar);
    intersection_terms(
        &point,
        &side.segment.direction(),
        &side.normal,
        &triangle.normal,
        sink,
    )
}

/// Endpoint terms of a side, classified by the parities of its tally
pub fn counted_endpoint_terms(
    side: &TriangleSide,
    count: &IntersectionCount,
    sink: &dyn TermSink,
) -> Real {
    endpoint_terms(side, count.start_inside(), count.end_inside(), sink)
}

/// Intersect one side with one triangle for the localized pass
///
/// Only on-segment hits matter here; the nearest one additionally records
/// whether the start lies on the inner side of the triangle it hit.
pub fn localized_side_triangle(
    triangle: &OrientedTriangle,
    side: &TriangleSide,
    count: &mut LocalizedIntersectionCount,
    sink: &dyn TermSink,
) -> Real {
    let Some(scalar) = solve_intersection(&triangle.triangle, &side.segment) else {
        return 0.0;
    };

    if !(0.0..=1.0).contains(&scalar) {
        return 0.0;
    }

    let point = side.segment.point_at(scalar);

    count.on_segment += 1;
    if scalar < count.closest {
        count.closest = scalar;
        count.start_inside = (side.segment.start - point).dot(&triangle.normal) > 0.0;
    }

    intersection_terms(
        &point,
        &side.segment.direction(),
        &side.normal,
        &triangle.normal,
        sink,
    )
}
