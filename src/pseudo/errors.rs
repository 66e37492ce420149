/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Error types for the pseudo module

use crate::mesh::MeshError;
use crate::meshfunc::MeshFunctionError;
use thiserror::Error;

/// Errors that can occur while building pseudopotential data
#[derive(Error, Debug)]
pub enum PseudoError {
    #[error("Invalid quantum numbers: n = {n}, l = {l}, j = {j}")]
    InvalidQuantumNumbers { n: i32, l: i32, j: f64 },

    #[error("Invalid NLCC scheme code: {0}")]
    InvalidNlccScheme(i32),

    #[error("A core density requires an NLCC scheme")]
    NlccDensityWithoutScheme,

    #[error("Channel l = {0} has no quantum-number index")]
    NoChannelIndex(i32),

    #[error("Mesh function error: {0}")]
    MeshFunction(#[from] MeshFunctionError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

/// Result type for pseudopotential data operations
pub type Result<T> = std::result::Result<T, PseudoError>;
