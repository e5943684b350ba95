// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh preprocessing utilities
//!
//! Vertex unification maps geometrically coincident vertices (quantized to a
//! configurable number of decimal digits) to a common index, turning a
//! triangle soup into an indexed graph. Perturbation jitters each unique
//! vertex by a tiny magnitude-scaled amount so that coplanar degeneracies
//! vanish with probability 1 before intersection evaluation.

use super::{Mesh, OrientedMesh, Triangle};
use crate::real::{magnitude, Real, UNIFY_DIGITS};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Deduplicate coincident vertices of a triangle soup
///
/// Returns the unique vertices (first occurrence wins, original coordinates
/// kept) and one index per triangle corner, three consecutive indices per
/// triangle. Coincidence is decided after rounding each coordinate to
/// `digits` decimal places.
pub fn unify_vertices(triangles: &[Triangle], digits: u32) -> (Vec<Point3<Real>>, Vec<usize>) {
    unify_iter(triangles.iter(), triangles.len(), digits)
}

fn unify_iter<'a>(
    triangles: impl Iterator<Item = &'a Triangle>,
    triangle_count: usize,
    digits: u32,
) -> (Vec<Point3<Real>>, Vec<usize>) {
    let scale = (10.0 as Real).powi(digits as i32);

    // assume most vertices are shared by at least three triangles
    let mut index_of: HashMap<(i64, i64, i64), usize> =
        HashMap::with_capacity(triangle_count.max(1));
    let mut vertices = Vec::new();
    let mut indices = Vec::with_capacity(triangle_count * 3);

    for triangle in triangles {
        for vertex in triangle.vertices() {
            match index_of.entry(quantize(&vertex, scale)) {
                Entry::Occupied(entry) => indices.push(*entry.get()),
                Entry::Vacant(entry) => {
                    let next_index = vertices.len();
                    vertices.push(vertex);
                    indices.push(next_index);
                    entry.insert(next_index);
                }
            }
        }
    }

    (vertices, indices)
}

fn quantize(point: &Point3<Real>, scale: Real) -> (i64, i64, i64) {
    (
        (point.x * scale).round() as i64,
        (point.y * scale).round() as i64,
        (point.z * scale).round() as i64,
    )
}

/// Directed-edge adjacency over unified vertex indices
///
/// `indices` holds three consecutive unified indices per triangle; each
/// directed edge `from -> to` of each triangle contributes one entry.
pub fn adjacency(vertex_count: usize, indices: &[usize]) -> Vec<Vec<usize>> {
    let mut list = vec![Vec::new(); vertex_count];
    for triangle in indices.chunks_exact(3) {
        for edge in 0..3 {
            list[triangle[edge]].push(triangle[(edge + 1) % 3]);
        }
    }
    list
}

/// Translate both meshes so that their common vertex centroid lands on the
/// origin; keeps intersection terms small for far-from-origin inputs
pub fn center_pair(first: &mut Mesh, second: &mut Mesh) {
    let count = (first.triangle_count() + second.triangle_count()) * 3;
    if count == 0 {
        return;
    }

    let mut sum = Vector3::zeros();
    for triangle in first.triangles.iter().chain(&second.triangles) {
        sum += triangle.a.coords + triangle.b.coords + triangle.c.coords;
    }
    let average = sum / count as Real;

    for triangle in first.triangles.iter_mut().chain(&mut second.triangles) {
        triangle.a -= average;
        triangle.b -= average;
        triangle.c -= average;
    }
}

impl Mesh {
    /// Deduplicate coincident vertices, see [`unify_vertices`]
    pub fn unify_vertices(&self, digits: u32) -> (Vec<Point3<Real>>, Vec<usize>) {
        unify_vertices(&self.triangles, digits)
    }

    /// Jitter each unique vertex by up to `eps`, scaled per coordinate by
    /// its power-of-two order of magnitude
    ///
    /// Vertices are unified first so that triangles sharing a vertex keep
    /// sharing it exactly after perturbation.
    pub fn perturb_with<R: Rng>(&mut self, eps: Real, rng: &mut R) {
        let (mut vertices, indices) = self.unify_vertices(UNIFY_DIGITS);

        for vertex in &mut vertices {
            vertex.x += rng.gen_range(-eps..=eps) * magnitude(vertex.x);
            vertex.y += rng.gen_range(-eps..=eps) * magnitude(vertex.y);
            vertex.z += rng.gen_range(-eps..=eps) * magnitude(vertex.z);
        }

        for (i, triangle) in self.triangles.iter_mut().enumerate() {
            triangle.a = vertices[indices[3 * i]];
            triangle.b = vertices[indices[3 * i + 1]];
            triangle.c = vertices[indices[3 * i + 2]];
        }
    }

    /// [`Mesh::perturb_with`] using a thread-local generator
    pub fn perturb(&mut self, eps: Real) {
        self.perturb_with(eps, &mut rand::thread_rng());
    }

    /// [`Mesh::perturb_with`] using a deterministic seed
    pub fn perturb_seeded(&mut self, eps: Real, seed: u64) {
        self.perturb_with(eps, &mut StdRng::seed_from_u64(seed));
    }
}

impl OrientedMesh {
    /// Deduplicate coincident vertices, see [`unify_vertices`]
    pub fn unify_vertices(&self, digits: u32) -> (Vec<Point3<Real>>, Vec<usize>) {
        unify_iter(
            self.triangles.iter().map(|t| &t.triangle),
            self.triangles.len(),
            digits,
        )
    }
}
