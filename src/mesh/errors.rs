/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Error types for the mesh module

use super::MeshType;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while building or copying a mesh
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("A mesh needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("Mesh array length mismatch: expected {expected} points, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Cannot generate a mesh of type {0}")]
    InvalidMeshType(MeshType),

    #[error("Out of memory while allocating mesh arrays: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Result type for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;
