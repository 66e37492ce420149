/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Kleinman-Bylander projectors

use super::errors::Result;
use super::qn::QuantumNumbers;
use crate::mesh::Mesh;
use crate::meshfunc::MeshFunction;
use crate::utils::Comparison;

/// Separable non-local projector: a radial function and its energy
#[derive(Debug, Clone)]
pub struct Projector {
    qn: QuantumNumbers,
    energy: f64,
    proj: MeshFunction,
}

impl Projector {
    /// Create a projector from samples on `mesh`
    pub fn new(qn: QuantumNumbers, energy: f64, mesh: &Mesh, proj: &[f64]) -> Result<Self> {
        let proj = MeshFunction::from_samples(mesh, proj, None, None)?;
        Ok(Self { qn, energy, proj })
    }

    pub fn from_function(qn: QuantumNumbers, energy: f64, proj: MeshFunction) -> Self {
        Self { qn, energy, proj }
    }

    pub fn qn(&self) -> &QuantumNumbers {
        &self.qn
    }

    /// Kleinman-Bylander energy
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn function(&self) -> &MeshFunction {
        &self.proj
    }

    pub fn eval(&self, r: f64) -> f64 {
        self.proj.eval(r)
    }

    pub fn eval_deriv(&self, r: f64) -> f64 {
        self.proj.eval_deriv(r)
    }

    pub fn eval_deriv2(&self, r: f64) -> f64 {
        self.proj.eval_deriv2(r)
    }

    pub fn compare(&self, other: &Projector) -> Comparison {
        Comparison::from_equal(
            self.qn.compare(&other.qn) == Comparison::Equal
                && self.energy == other.energy
                && self.proj.compare(&other.proj) == Comparison::Equal,
        )
    }
}
