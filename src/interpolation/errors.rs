/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Error types for the interpolation module

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while fitting a spline or building an interpolator
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("A cubic spline needs at least {required} knots, got {found}")]
    TooFewPoints { required: usize, found: usize },

    #[error("Spline knots must be strictly increasing: t[{index}] = {left}, t[{next}] = {right}", next = .index + 1)]
    NotStrictlyIncreasing { index: usize, left: f64, right: f64 },

    #[error("Interpolation data length mismatch: expected {expected} values, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Spline system is singular: zero or non-finite pivot in row {row}")]
    SingularSystem { row: usize },

    #[error("Unsupported interpolation method: {0}")]
    UnsupportedMethod(String),

    #[error("Out of memory while allocating spline data: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Result type for interpolation operations
pub type Result<T> = std::result::Result<T, InterpolationError>;
