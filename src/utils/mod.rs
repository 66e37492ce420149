/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Shared utilities for the pspio-rs crate
//!
//! Tolerances, the three-way comparison result used by every data
//! structure, and small numerical helpers.

pub mod constants;
pub mod math;

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;

pub use math::{close_relative, linear_interpolate, within_tolerance};

/// Outcome of a structural comparison between two objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Objects are identical (within the relevant tolerance)
    Equal,
    /// Objects share their type but not all their data
    ///
    /// For meshes: same type and parameters, different number of points.
    /// For quantum numbers: same `l` and `j`, different `n`.
    TypeEqual,
    /// Objects differ
    Diff,
}

impl Comparison {
    /// Map a boolean equality test to `Equal` or `Diff`
    pub fn from_equal(equal: bool) -> Self {
        if equal {
            Comparison::Equal
        } else {
            Comparison::Diff
        }
    }

    /// Whether this is `Comparison::Equal`
    pub fn is_equal(self) -> bool {
        self == Comparison::Equal
    }

    /// Combine two results, keeping the worst of the two
    pub fn and(self, other: Comparison) -> Self {
        match (self, other) {
            (Comparison::Diff, _) | (_, Comparison::Diff) => Comparison::Diff,
            (Comparison::TypeEqual, _) | (_, Comparison::TypeEqual) => Comparison::TypeEqual,
            _ => Comparison::Equal,
        }
    }

    /// Compare two optional objects: both absent is `Equal`, one absent is `Diff`
    pub fn optional<T, F>(lhs: Option<&T>, rhs: Option<&T>, compare: F) -> Self
    where
        F: FnOnce(&T, &T) -> Comparison,
    {
        match (lhs, rhs) {
            (None, None) => Comparison::Equal,
            (Some(a), Some(b)) => compare(a, b),
            _ => Comparison::Diff,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Comparison::Equal => "equal",
            Comparison::TypeEqual => "type-equal",
            Comparison::Diff => "diff",
        };
        write!(f, "{}", name)
    }
}

/// Allocate a zero-filled vector of `len` doubles without aborting on failure
pub fn try_zeroed(len: usize) -> std::result::Result<Vec<f64>, TryReserveError> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, 0.0);
    Ok(values)
}

/// Copy `src` into a freshly allocated vector, reporting allocation failure
pub fn try_copy(src: &[f64]) -> std::result::Result<Vec<f64>, TryReserveError> {
    let mut values = Vec::new();
    values.try_reserve_exact(src.len())?;
    values.extend_from_slice(src);
    Ok(values)
}
