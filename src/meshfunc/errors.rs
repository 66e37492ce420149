/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Error types for the meshfunc module

use crate::interpolation::InterpolationError;
use crate::mesh::MeshError;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while building or copying a mesh function
#[derive(Error, Debug)]
pub enum MeshFunctionError {
    #[error("Length mismatch for {array}: mesh has {expected} points, got {found} values")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Out of memory while allocating mesh function arrays: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Result type for mesh function operations
pub type Result<T> = std::result::Result<T, MeshFunctionError>;
