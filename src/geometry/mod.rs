// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and preprocessing

mod analytics;
mod bbox;
mod mesh;
mod mesh_utils;
mod primitives;

pub use analytics::{analyze, GeometryStats};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, OrientedMesh, OrientedTriangle, Segment, Triangle, TriangleSide};
pub use mesh_utils::{adjacency, center_pair, unify_vertices};
pub use primitives::Primitive;
