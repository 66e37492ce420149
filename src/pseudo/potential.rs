/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Pseudopotential channels

use super::errors::Result;
use super::qn::QuantumNumbers;
use crate::mesh::Mesh;
use crate::meshfunc::MeshFunction;
use crate::utils::Comparison;

/// Radial pseudopotential of one angular momentum channel
#[derive(Debug, Clone)]
pub struct Potential {
    qn: QuantumNumbers,
    v: MeshFunction,
}

impl Potential {
    /// Create a potential from samples on `mesh`, derivatives from the spline
    pub fn new(qn: QuantumNumbers, mesh: &Mesh, v: &[f64]) -> Result<Self> {
        let v = MeshFunction::from_samples(mesh, v, None, None)?;
        Ok(Self { qn, v })
    }

    /// Create a potential from an already built mesh function
    pub fn from_function(qn: QuantumNumbers, v: MeshFunction) -> Self {
        Self { qn, v }
    }

    pub fn qn(&self) -> &QuantumNumbers {
        &self.qn
    }

    pub fn function(&self) -> &MeshFunction {
        &self.v
    }

    pub fn eval(&self, r: f64) -> f64 {
        self.v.eval(r)
    }

    pub fn eval_deriv(&self, r: f64) -> f64 {
        self.v.eval_deriv(r)
    }

    pub fn eval_deriv2(&self, r: f64) -> f64 {
        self.v.eval_deriv2(r)
    }

    pub fn compare(&self, other: &Potential) -> Comparison {
        Comparison::from_equal(
            self.qn.compare(&other.qn) == Comparison::Equal
                && self.v.compare(&other.v) == Comparison::Equal,
        )
    }
}
