/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Radial meshes
//!
//! A mesh is the ordered list of radii `r` on which radial functions are
//! tabulated, together with `rab = dr/di`, the Jacobian used for discrete
//! integration. Meshes are generated from parameters, copied from explicit
//! arrays, or built from raw radii with automatic recognition of the
//! generating formula.

pub mod detect;
pub mod errors;

pub use errors::{MeshError, Result};

use crate::utils::constants::MESH_TOLERANCE;
use crate::utils::{close_relative, try_copy, try_zeroed, Comparison};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generating formula of a mesh
///
/// Point indices are 0-based but the exponent is 1-based, which is the
/// convention legacy pseudopotential files rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshType {
    /// `r[i] = a(i+1) + b`, `rab[i] = a`
    Linear,
    /// `r[i] = b exp(a(i+1))`, `rab[i] = a r[i]`
    Log1,
    /// `r[i] = b (exp(a(i+1)) - 1)`, `rab[i] = a r[i] + a b`
    Log2,
    /// Arbitrary radii with no known generator
    #[default]
    Unknown,
}

impl MeshType {
    /// Radius and Jacobian of point `i` for the given parameters
    ///
    /// Returns `None` for `MeshType::Unknown`.
    pub fn point(self, a: f64, b: f64, i: usize) -> Option<(f64, f64)> {
        let x = (i + 1) as f64;
        match self {
            MeshType::Linear => Some((a * x + b, a)),
            MeshType::Log1 => {
                let r = b * (a * x).exp();
                Some((r, a * r))
            }
            MeshType::Log2 => {
                let r = b * ((a * x).exp() - 1.0);
                Some((r, a * r + a * b))
            }
            MeshType::Unknown => None,
        }
    }

    /// Whether the mesh follows a known generating formula
    pub fn is_known(self) -> bool {
        self != MeshType::Unknown
    }
}

impl fmt::Display for MeshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeshType::Linear => "linear",
            MeshType::Log1 => "log1",
            MeshType::Log2 => "log2",
            MeshType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A radial mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    mesh_type: MeshType,
    a: f64,
    b: f64,
    r: Vec<f64>,
    rab: Vec<f64>,
}

impl Mesh {
    /// Allocate a zero-filled mesh of `np` points with an unknown type
    pub fn new(np: usize) -> Result<Self> {
        if np < 2 {
            return Err(MeshError::TooFewPoints(np));
        }

        Ok(Self {
            mesh_type: MeshType::Unknown,
            a: 0.0,
            b: 0.0,
            r: try_zeroed(np)?,
            rab: try_zeroed(np)?,
        })
    }

    /// Build a mesh of `np` points from its generating parameters
    pub fn from_parameters(mesh_type: MeshType, a: f64, b: f64, np: usize) -> Result<Self> {
        let mut mesh = Self::new(np)?;
        mesh.init_from_parameters(mesh_type, a, b)?;
        Ok(mesh)
    }

    /// Build a mesh from raw radii, recognizing its type when possible
    pub fn from_points(r: &[f64], rab: Option<&[f64]>) -> Result<Self> {
        let mut mesh = Self::new(r.len())?;
        mesh.init_from_points(r, rab)?;
        Ok(mesh)
    }

    /// Set every field explicitly
    ///
    /// The arrays are copied as given: nothing checks that they agree with
    /// the type and parameters.
    pub fn init(
        &mut self,
        mesh_type: MeshType,
        a: f64,
        b: f64,
        r: &[f64],
        rab: &[f64],
    ) -> Result<()> {
        self.check_len(r.len())?;
        self.check_len(rab.len())?;

        self.mesh_type = mesh_type;
        self.a = a;
        self.b = b;
        self.r.copy_from_slice(r);
        self.rab.copy_from_slice(rab);
        Ok(())
    }

    /// Generate the radii and Jacobian from the mesh parameters
    pub fn init_from_parameters(&mut self, mesh_type: MeshType, a: f64, b: f64) -> Result<()> {
        if !mesh_type.is_known() {
            return Err(MeshError::InvalidMeshType(mesh_type));
        }

        for i in 0..self.np() {
            // Known types always yield a point
            if let Some((r, rab)) = mesh_type.point(a, b, i) {
                self.r[i] = r;
                self.rab[i] = rab;
            }
        }
        self.mesh_type = mesh_type;
        self.a = a;
        self.b = b;

        trace!("Generated {} mesh: a = {}, b = {}, np = {}", mesh_type, a, b, self.np());
        Ok(())
    }

    /// Copy raw radii (and optionally the Jacobian), then identify the mesh type
    ///
    /// When a known type is recognized and `rab` is not given, the Jacobian is
    /// filled from the closed form. Otherwise the type is `Unknown`, `a = b = 0`
    /// and `rab` is copied when given or left untouched.
    pub fn init_from_points(&mut self, r: &[f64], rab: Option<&[f64]>) -> Result<()> {
        self.check_len(r.len())?;
        if let Some(rab) = rab {
            self.check_len(rab.len())?;
        }

        self.r.copy_from_slice(r);
        if let Some(rab) = rab {
            self.rab.copy_from_slice(rab);
        }

        match detect::detect(r) {
            Some((mesh_type, a, b)) => {
                debug!("Recognized {} mesh: a = {}, b = {}", mesh_type, a, b);
                self.mesh_type = mesh_type;
                self.a = a;
                self.b = b;
                if rab.is_none() {
                    for (i, value) in self.rab.iter_mut().enumerate() {
                        if let Some((_, jacobian)) = mesh_type.point(a, b, i) {
                            *value = jacobian;
                        }
                    }
                }
            }
            None => {
                debug!("Mesh of {} points has no known generator", r.len());
                self.mesh_type = MeshType::Unknown;
                self.a = 0.0;
                self.b = 0.0;
            }
        }

        Ok(())
    }

    /// Compare two meshes
    ///
    /// Meshes of the same known type are compared through their parameters:
    /// `Equal` if the number of points also agrees, `TypeEqual` otherwise.
    /// As soon as one of them is of unknown type the radii are compared
    /// point by point.
    pub fn compare(&self, other: &Mesh) -> Comparison {
        if self.mesh_type.is_known() && other.mesh_type.is_known() {
            let same_generator = self.mesh_type == other.mesh_type
                && same_parameter(self.a, other.a)
                && same_parameter(self.b, other.b);

            return match (same_generator, self.np() == other.np()) {
                (true, true) => Comparison::Equal,
                (true, false) => Comparison::TypeEqual,
                (false, _) => Comparison::Diff,
            };
        }

        if self.np() != other.np() {
            return Comparison::Diff;
        }
        let same_points = self
            .r
            .iter()
            .zip(&other.r)
            .all(|(&lhs, &rhs)| close_relative(lhs, rhs, MESH_TOLERANCE));
        Comparison::from_equal(same_points)
    }

    /// Overwrite this mesh with a deep copy of `src`, reporting allocation failure
    pub fn copy_from(&mut self, src: &Mesh) -> Result<()> {
        if self.np() != src.np() {
            self.r = try_copy(&src.r)?;
            self.rab = try_copy(&src.rab)?;
        } else {
            self.r.copy_from_slice(&src.r);
            self.rab.copy_from_slice(&src.rab);
        }
        self.mesh_type = src.mesh_type;
        self.a = src.a;
        self.b = src.b;
        Ok(())
    }

    /// Number of points
    pub fn np(&self) -> usize {
        self.r.len()
    }

    pub fn mesh_type(&self) -> MeshType {
        self.mesh_type
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Radii
    pub fn r(&self) -> &[f64] {
        &self.r
    }

    /// Jacobian `dr/di`
    pub fn rab(&self) -> &[f64] {
        &self.rab
    }

    fn check_len(&self, found: usize) -> Result<()> {
        if found != self.np() {
            return Err(MeshError::LengthMismatch {
                expected: self.np(),
                found,
            });
        }
        Ok(())
    }
}

fn same_parameter(lhs: f64, rhs: f64) -> bool {
    close_relative(lhs, rhs, MESH_TOLERANCE)
}
