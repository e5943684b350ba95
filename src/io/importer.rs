// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh importer
//!
//! Loads triangle soups from disk, dispatching on the file extension.
//! STL (binary or ASCII, auto-detected) is the only supported format; the
//! per-facet normals stored in the file are ignored and recomputed from the
//! winding when the caller runs normal generation.

use crate::error::MeshError;
use crate::geometry::{Mesh, Triangle};
use crate::real::Real;
use nalgebra::Point3;
use std::fs::File;
use std::path::Path;

/// Load a mesh from a file, dispatching on its extension
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| MeshError::MissingExtension(path.display().to_string()))?;

    match extension.to_lowercase().as_str() {
        "stl" => load_stl(path),
        other => Err(MeshError::UnsupportedFormat(other.to_string())),
    }
}

fn load_stl(path: &Path) -> Result<Mesh, MeshError> {
    let mut file = File::open(path)?;
    let indexed = stl_io::read_stl(&mut file)?;

    let vertices: Vec<Point3<Real>> = indexed
        .vertices
        .iter()
        .map(|v| Point3::new(Real::from(v[0]), Real::from(v[1]), Real::from(v[2])))
        .collect();

    let triangles = indexed
        .faces
        .iter()
        .map(|face| {
            Triangle::new(
                vertices[face.vertices[0]],
                vertices[face.vertices[1]],
                vertices[face.vertices[2]],
            )
        })
        .collect();

    Ok(Mesh::from_triangles(triangles))
}
