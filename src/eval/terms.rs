// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Trilinear term generation
//!
//! The intersection volume of two closed meshes equals one sixth of the sum,
//! over the geometric features produced by their surfaces crossing, of the
//! trilinear form `T(p, t, u, n) = (p·t)(p·u)(p·n)` where `t, u, n` is a
//! right-handed orthonormal frame chosen by the rules below. The orientation
//! rules are load-bearing: a sign flip produces wrong but plausible-looking
//! volumes, so they are implemented exactly as derived and validated through
//! the scenario tests.

use crate::geometry::TriangleSide;
use crate::real::Real;
use nalgebra::{Point3, Vector3};
use std::sync::Mutex;

/// One evaluated term: the position, the frame it was evaluated in, and the
/// resulting value
#[derive(Debug, Clone, Copy)]
pub struct TermRecord {
    pub position: Point3<Real>,
    pub tangent: Vector3<Real>,
    pub binormal: Vector3<Real>,
    pub normal: Vector3<Real>,
    pub value: Real,
}

/// Receiver for evaluated terms
///
/// The evaluator reports every term it generates to a sink passed in
/// explicitly; there is no process-global buffer. Implementations must be
/// thread safe, the passes call them from worker threads.
pub trait TermSink: Sync {
    fn record(&self, term: TermRecord);
}

/// Sink that discards all terms; the default for plain volume queries
pub struct NullSink;

impl TermSink for NullSink {
    #[inline]
    fn record(&self, _term: TermRecord) {}
}

/// Sink that collects every term, for debugging and visualization
#[derive(Default)]
pub struct TermCollector {
    records: Mutex<Vec<TermRecord>>,
}

impl TermCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<TermRecord> {
        self.records.into_inner().unwrap()
    }
}

impl TermSink for TermCollector {
    fn record(&self, term: TermRecord) {
        self.records.lock().unwrap().push(term);
    }
}

/// `target`, flipped if needed so that it points along `reference`
pub fn orient_toward(reference: Vector3<Real>, target: Vector3<Real>) -> Vector3<Real> {
    if reference.dot(&target) < 0.0 {
        -target
    } else {
        target
    }
}

/// Evaluate `T(p, t, u, n) = (p·t)(p·u)(p·n)` and report it to the sink
pub fn evaluate_term(
    position: &Point3<Real>,
    tangent: &Vector3<Real>,
    binormal: &Vector3<Real>,
    normal: &Vector3<Real>,
    sink: &dyn TermSink,
) -> Real {
    let p = &position.coords;
    let value = p.dot(tangent) * p.dot(binormal) * p.dot(normal);
    sink.record(TermRecord {
        position: *position,
        tangent: *tangent,
        binormal: *binormal,
        normal: *normal,
        value,
    });
    value
}

/// Terms emitted where a directed segment (lying in a face with normal
/// `line_normal`, pointing along `line_direction`) crosses a triangle with
/// normal `triangle_normal`
pub fn intersection_terms(
    point: &Point3<Real>,
    line_direction: &Vector3<Real>,
    line_normal: &Vector3<Real>,
    triangle_normal: &Vector3<Real>,
    sink: &dyn TermSink,
) -> Real {
    let mut sum = 0.0;

    let inside_direction = line_normal.cross(line_direction).normalize();

    // term tangential to the segment
    {
        let tangent = orient_toward(-triangle_normal, line_direction.normalize());
        sum += evaluate_term(point, &tangent, &inside_direction, line_normal, sink);
    }

    // terms along the face intersection
    {
        let tangent = orient_toward(
            inside_direction,
            line_normal.cross(triangle_normal).normalize(),
        );
        // coplanar with the segment's face
        {
            let binormal =
                orient_toward(-triangle_normal, line_normal.cross(&tangent).normalize());
            sum += evaluate_term(point, &tangent, &binormal, line_normal, sink);
        }
        // coplanar with the triangle
        {
            let binormal =
                orient_toward(-line_normal, triangle_normal.cross(&tangent).normalize());
            sum += evaluate_term(point, &tangent, &binormal, triangle_normal, sink);
        }
    }

    sum
}

/// Terms emitted for the endpoints of a side that lie inside the other mesh
pub fn endpoint_terms(
    side: &TriangleSide,
    start_inside: bool,
    end_inside: bool,
    sink: &dyn TermSink,
) -> Real {
    let mut accum = 0.0;

    if start_inside {
        let tangent = side.segment.direction().normalize();
        let binormal = side.normal.cross(&tangent);
        accum += evaluate_term(&side.segment.start, &tangent, &binormal, &side.normal, sink);
    }

    if end_inside {
        let tangent = (-side.segment.direction()).normalize();
        let binormal = -side.normal.cross(&tangent);
        accum += evaluate_term(&side.segment.end, &tangent, &binormal, &side.normal, sink);
    }

    accum
}

/// Contribution of one directed triangle edge to the single-mesh volume sum
pub fn edge_term(
    start: &Point3<Real>,
    end: &Point3<Real>,
    normal: &Vector3<Real>,
    sink: &dyn TermSink,
) -> Real {
    let tangent = (end - start).normalize();
    let surface = normal.cross(&tangent);
    evaluate_term(start, &tangent, &surface, normal, sink)
        + evaluate_term(end, &(-tangent), &surface, normal, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_term_is_product_of_dots() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let t = Vector3::new(1.0, 0.0, 0.0);
        let u = Vector3::new(0.0, 1.0, 0.0);
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(evaluate_term(&p, &t, &u, &n, &NullSink), 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_orient_toward_flips_opposing_vectors() {
        let reference = Vector3::new(0.0, 0.0, 1.0);
        let aligned = Vector3::new(0.3, 0.1, 0.5);
        let opposing = Vector3::new(0.3, 0.1, -0.5);
        assert_eq!(orient_toward(reference, aligned), aligned);
        assert_eq!(orient_toward(reference, opposing), -opposing);
    }

    #[test]
    fn test_edge_term_pair_matches_endpoint_terms() {
        // an edge with both endpoints inside contributes exactly its
        // single-mesh volume terms
        let side = TriangleSide {
            segment: Segment::new(Point3::new(0.2, 0.4, 0.8), Point3::new(1.0, 0.5, 0.6)),
            third: Point3::new(0.0, 1.0, 0.0),
            normal: Vector3::new(0.1, 0.3, 0.9).normalize(),
        };
        let from_endpoints = endpoint_terms(&side, true, true, &NullSink);
        let from_edge = edge_term(
            &side.segment.start,
            &side.segment.end,
            &side.normal,
            &NullSink,
        );
        assert_relative_eq!(from_endpoints, from_edge, epsilon = 1e-4);
    }

    #[test]
    fn test_collector_records_all_terms() {
        let collector = TermCollector::new();
        let side = TriangleSide {
            segment: Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
            third: Point3::new(0.0, 1.0, 0.0),
            normal: Vector3::new(0.0, 0.0, 1.0),
        };
        endpoint_terms(&side, true, true, &collector);
        assert_eq!(collector.len(), 2);

        let records = collector.into_records();
        assert_relative_eq!(records[0].tangent.x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(records[1].tangent.x, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_intersection_terms_frames_are_orthonormal() {
        let collector = TermCollector::new();
        let point = Point3::new(0.5, 0.25, 0.75);
        let line_direction = Vector3::new(1.0, 0.2, 0.0);
        let line_normal = Vector3::new(0.0, 0.0, 1.0);
        let triangle_normal = Vector3::new(0.0, 1.0, 0.0);
        intersection_terms(
            &point,
            &line_direction,
            &line_normal,
            &triangle_normal,
            &collector,
        );

        let records = collector.into_records();
        assert_eq!(records.len(), 3);
        for record in records {
            assert_relative_eq!(record.tangent.norm(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(record.binormal.norm(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(record.tangent.dot(&record.binormal), 0.0, epsilon = 1e-4);
        }
    }
}
