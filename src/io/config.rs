/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Configuration for building data read from files

use crate::interpolation::InterpolationMethod;
use crate::mesh::Mesh;
use crate::meshfunc::{MeshFunction, MeshFunctionError, SecondDerivativeSource};

/// Options controlling how readers build mesh functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatConfig {
    /// Spline backend for every mesh function
    pub interp_method: InterpolationMethod,
    /// Where missing second derivatives come from
    pub second_derivative_source: SecondDerivativeSource,
}

impl FormatConfig {
    pub fn with_interp_method(mut self, method: InterpolationMethod) -> Self {
        self.interp_method = method;
        self
    }

    pub fn with_second_derivative_source(mut self, source: SecondDerivativeSource) -> Self {
        self.second_derivative_source = source;
        self
    }

    /// Build a mesh function from samples following this configuration
    pub fn mesh_function(
        &self,
        mesh: &Mesh,
        f: &[f64],
        fp: Option<&[f64]>,
        fpp: Option<&[f64]>,
    ) -> Result<MeshFunction, MeshFunctionError> {
        let mut function = MeshFunction::with_method(mesh.np(), self.interp_method)?
            .with_second_derivative_source(self.second_derivative_source);
        function.init(mesh, f, fp, fpp)?;
        Ok(function)
    }
}
