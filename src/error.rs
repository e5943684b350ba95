// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the mesh I/O surface
//!
//! The geometric core itself is total over valid inputs and returns plain
//! values; only loading meshes from disk can fail.

use thiserror::Error;

/// Errors produced while loading a mesh
#[derive(Debug, Error)]
pub enum MeshError {
    /// The file extension maps to no supported mesh format
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// The path has no extension to dispatch on
    #[error("cannot infer mesh format of {0}: missing file extension")]
    MissingExtension(String),

    /// Reading or parsing the file failed
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
}
