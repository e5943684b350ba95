// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segment-vs-triangle intersection solver

use crate::geometry::{Segment, Triangle};
use crate::real::{Real, DET_EPSILON};
use nalgebra::Matrix3;

/// Solve the segment-vs-triangle linear system
///
/// Solves `x·(b−a) + y·(c−a) + z·(start−end) = start−a`. Returns the segment
/// parameter `z` such that the intersection point is
/// `(1−z)·start + z·end`, or `None` when the segment's line is parallel to
/// the triangle's plane (|det| below [`DET_EPSILON`]) or the solution falls
/// outside the triangle in barycentric coordinates.
///
/// Coplanar configurations are silently dropped; callers are expected to
/// have perturbed vertices so that those vanish with probability 1.
pub fn solve_intersection(triangle: &Triangle, segment: &Segment) -> Option<Real> {
    let columns = Matrix3::from_columns(&[
        triangle.b - triangle.a,
        triangle.c - triangle.a,
        segment.start - segment.end,
    ]);

    // line is parallel to the surface
    if columns.determinant().abs() < DET_EPSILON {
        return None;
    }

    let target = segment.start - triangle.a;
    let solution = columns.try_inverse()? * target;

    // line does not pass through the triangle
    if solution.x < 0.0 || solution.y < 0.0 || solution.x + solution.y > 1.0 {
        return None;
    }

    Some(solution.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn xy_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn test_segment_through_triangle() {
        let segment = Segment::new(Point3::new(0.5, 0.5, -1.0), Point3::new(0.5, 0.5, 1.0));
        let s = solve_intersection(&xy_triangle(), &segment).unwrap();
        assert_relative_eq!(s, 0.5, epsilon = 1e-4);

        let point = segment.point_at(s);
        assert_relative_eq!(point.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hit_before_segment_is_negative() {
        let segment = Segment::new(Point3::new(0.5, 0.5, 1.0), Point3::new(0.5, 0.5, 2.0));
        let s = solve_intersection(&xy_triangle(), &segment).unwrap();
        assert_relative_eq!(s, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hit_past_segment_is_above_one() {
        let segment = Segment::new(Point3::new(0.5, 0.5, -2.0), Point3::new(0.5, 0.5, -1.0));
        let s = solve_intersection(&xy_triangle(), &segment).unwrap();
        assert_relative_eq!(s, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_line_outside_triangle() {
        let segment = Segment::new(Point3::new(1.5, 1.5, -1.0), Point3::new(1.5, 1.5, 1.0));
        assert!(solve_intersection(&xy_triangle(), &segment).is_none());
    }

    #[test]
    fn test_parallel_segment_is_dropped() {
        let segment = Segment::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0));
        assert!(solve_intersection(&xy_triangle(), &segment).is_none());

        // coplanar counts as parallel too
        let coplanar = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        assert!(solve_intersection(&xy_triangle(), &coplanar).is_none());
    }
}
