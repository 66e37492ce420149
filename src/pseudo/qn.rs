/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Quantum numbers labelling states, potentials and projectors

use super::errors::{PseudoError, Result};
use crate::utils::constants::L_LETTERS;
use crate::utils::Comparison;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal (`n`), angular momentum (`l`) and total angular momentum (`j`) quantum numbers
///
/// `j = 0` marks a non-relativistic channel. `l = -1` is allowed for
/// channels that carry no angular momentum label, such as a local potential.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawQuantumNumbers")]
pub struct QuantumNumbers {
    n: i32,
    l: i32,
    j: f64,
}

/// Deserialized fields, validated by [`QuantumNumbers::new`]
#[derive(Deserialize)]
struct RawQuantumNumbers {
    n: i32,
    l: i32,
    j: f64,
}

impl TryFrom<RawQuantumNumbers> for QuantumNumbers {
    type Error = PseudoError;

    fn try_from(raw: RawQuantumNumbers) -> Result<Self> {
        QuantumNumbers::new(raw.n, raw.l, raw.j)
    }
}

impl QuantumNumbers {
    /// Create validated quantum numbers
    ///
    /// Requires `l >= -1` and, for relativistic channels, `|j - l| = 1/2`.
    pub fn new(n: i32, l: i32, j: f64) -> Result<Self> {
        let valid_j = j == 0.0 || ((j - l as f64).abs() - 0.5).abs() < 1.0e-9;
        if l < -1 || !valid_j {
            return Err(PseudoError::InvalidQuantumNumbers { n, l, j });
        }
        Ok(Self { n, l, j })
    }

    pub fn n(&self) -> i32 {
        self.n
    }

    pub fn l(&self) -> i32 {
        self.l
    }

    pub fn j(&self) -> f64 {
        self.j
    }

    pub fn is_relativistic(&self) -> bool {
        self.j != 0.0
    }

    /// Compare: `TypeEqual` when only `n` differs
    pub fn compare(&self, other: &QuantumNumbers) -> Comparison {
        if self.l != other.l || self.j != other.j {
            Comparison::Diff
        } else if self.n != other.n {
            Comparison::TypeEqual
        } else {
            Comparison::Equal
        }
    }

    /// Spectroscopic label such as `2p` or, for relativistic channels, `2p1.5`
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Channel index `l + floor(j)`, used to address potentials and state tables
    ///
    /// Returns `None` for `l = -1`.
    pub fn lj_index(&self) -> Option<usize> {
        lj_to_index(self.l, self.j)
    }
}

/// Channel index for `(l, j)`: `l` when non-relativistic, `l + floor(j)` otherwise
pub fn lj_to_index(l: i32, j: f64) -> Option<usize> {
    let index = l + j as i32;
    (l >= 0 && index >= 0).then_some(index as usize)
}

impl fmt::Display for QuantumNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = usize::try_from(self.l)
            .ok()
            .and_then(|l| L_LETTERS.chars().nth(l))
            .unwrap_or('?');
        if self.is_relativistic() {
            write!(f, "{}{}{:.1}", self.n, letter, self.j)
        } else {
            write!(f, "{}{}", self.n, letter)
        }
    }
}
