/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Numerical constants shared across the crate

/// Relative tolerance used to recognize mesh types and compare mesh parameters
pub const MESH_TOLERANCE: f64 = 1.0e-10;

/// 4π, the spherical normalization used by some file formats for densities
pub const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

/// Orbital angular momentum letters, indexed by `l`
pub const L_LETTERS: &str = "spdfghi";

/// Placeholder used when a format does not carry a piece of information
pub const NOT_DEFINED: &str = "N/D";
