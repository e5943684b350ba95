// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyvol Mesh Intersection Volume Kernel
//!
//! Computes the volume of the intersection of two closed triangle meshes
//! without constructing the intersection polyhedron: the volume is expressed
//! as a sum of per-triangle-edge contributions that are evaluated locally
//! and in parallel. Inputs are triangle soups with outward winding; callers
//! should perturb vertices before evaluation to break coplanar degeneracies.

pub mod error;
pub mod eval;
pub mod geometry;
pub mod intersect;
pub mod io;
pub mod real;

pub use error::MeshError;
pub use eval::terms::{NullSink, TermCollector, TermRecord, TermSink};
pub use geometry::{
    analyze, BoundingBox, GeometryStats, Mesh, OrientedMesh, OrientedTriangle, Primitive, Segment,
    Triangle, TriangleSide,
};
pub use intersect::{
    intersection_volume, intersection_volume_with_sink, localized_intersection_volume,
    localized_intersection_volume_with_sink, volume, VertexLocation,
};
pub use io::load_mesh;
pub use real::{Real, DEFAULT_PERTURBATION};
