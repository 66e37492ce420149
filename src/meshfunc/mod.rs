/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Functions tabulated on a radial mesh
//!
//! A [`MeshFunction`] stores a function together with its first and second
//! derivatives on its own copy of a mesh. Each of the three arrays gets its
//! own interpolator; inside the mesh every evaluation goes through the
//! interpolator of the requested array, outside it the two tabulated
//! boundary values of that array are extrapolated linearly.

pub mod errors;

pub use errors::{MeshFunctionError, Result};

use crate::interpolation::{InterpolationMethod, Interpolator};
use crate::mesh::Mesh;
use crate::utils::{linear_interpolate, try_copy, try_zeroed, Comparison};
use log::trace;
use serde::{Deserialize, Serialize};

/// Where a missing second derivative is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondDerivativeSource {
    /// Second derivative of the spline through the function values.
    ///
    /// This is what existing pseudopotential files were written with and
    /// must be kept for round trips to reproduce them.
    #[default]
    FunctionSpline,
    /// First derivative of the spline through the first-derivative values
    DerivativeSpline,
}

/// A function, its first and second derivatives, tabulated on a mesh
#[derive(Debug, Clone)]
pub struct MeshFunction {
    mesh: Mesh,
    f: Vec<f64>,
    fp: Vec<f64>,
    fpp: Vec<f64>,
    f_interp: Interpolator,
    fp_interp: Interpolator,
    fpp_interp: Interpolator,
    fpp_source: SecondDerivativeSource,
}

impl MeshFunction {
    /// Allocate a zero mesh function of `np` points with the default interpolation
    pub fn new(np: usize) -> Result<Self> {
        Self::with_method(np, InterpolationMethod::default())
    }

    /// Allocate a zero mesh function of `np` points
    pub fn with_method(np: usize, method: InterpolationMethod) -> Result<Self> {
        Ok(Self {
            mesh: Mesh::new(np)?,
            f: try_zeroed(np)?,
            fp: try_zeroed(np)?,
            fpp: try_zeroed(np)?,
            f_interp: Interpolator::new(method, np)?,
            fp_interp: Interpolator::new(method, np)?,
            fpp_interp: Interpolator::new(method, np)?,
            fpp_source: SecondDerivativeSource::default(),
        })
    }

    /// Select how `init` fills a missing second derivative
    pub fn with_second_derivative_source(mut self, source: SecondDerivativeSource) -> Self {
        self.fpp_source = source;
        self
    }

    /// Build a mesh function from samples with the default interpolation
    pub fn from_samples(
        mesh: &Mesh,
        f: &[f64],
        fp: Option<&[f64]>,
        fpp: Option<&[f64]>,
    ) -> Result<Self> {
        Self::from_samples_with(InterpolationMethod::default(), mesh, f, fp, fpp)
    }

    /// Build a mesh function from samples with the given interpolation
    pub fn from_samples_with(
        method: InterpolationMethod,
        mesh: &Mesh,
        f: &[f64],
        fp: Option<&[f64]>,
        fpp: Option<&[f64]>,
    ) -> Result<Self> {
        let mut function = Self::with_method(mesh.np(), method)?;
        function.init(mesh, f, fp, fpp)?;
        Ok(function)
    }

    /// Set the mesh and the tabulated values
    ///
    /// A missing `fp` is the derivative of the spline through `f` at the mesh
    /// points. A missing `fpp` follows the second derivative source, by
    /// default the second derivative of the spline through `f`.
    ///
    /// On error the mesh function is left unchanged.
    pub fn init(
        &mut self,
        mesh: &Mesh,
        f: &[f64],
        fp: Option<&[f64]>,
        fpp: Option<&[f64]>,
    ) -> Result<()> {
        let np = mesh.np();
        check_len("f", np, f.len())?;
        if let Some(fp) = fp {
            check_len("fp", np, fp.len())?;
        }
        if let Some(fpp) = fpp {
            check_len("fpp", np, fpp.len())?;
        }

        *self = Self::build(self.interp_method(), self.fpp_source, mesh, f, fp, fpp)?;

        trace!(
            "Initialized mesh function on {} points (fp given: {}, fpp given: {})",
            np,
            fp.is_some(),
            fpp.is_some()
        );
        Ok(())
    }

    /// Fit all three interpolators into a new value; nothing is shared with `self`
    fn build(
        method: InterpolationMethod,
        fpp_source: SecondDerivativeSource,
        mesh: &Mesh,
        f: &[f64],
        fp: Option<&[f64]>,
        fpp: Option<&[f64]>,
    ) -> Result<Self> {
        let np = mesh.np();
        let mut staged_mesh = Mesh::new(np)?;
        staged_mesh.copy_from(mesh)?;
        let radii = staged_mesh.r();

        let f = try_copy(f)?;
        let mut f_interp = Interpolator::new(method, np)?;
        f_interp.init(&staged_mesh, &f)?;

        let fp = match fp {
            Some(fp) => try_copy(fp)?,
            None => sample(radii, |r| f_interp.eval_deriv(r))?,
        };
        let mut fp_interp = Interpolator::new(method, np)?;
        fp_interp.init(&staged_mesh, &fp)?;

        let fpp = match (fpp, fpp_source) {
            (Some(fpp), _) => try_copy(fpp)?,
            (None, SecondDerivativeSource::FunctionSpline) => {
                sample(radii, |r| f_interp.eval_deriv2(r))?
            }
            (None, SecondDerivativeSource::DerivativeSpline) => {
                sample(radii, |r| fp_interp.eval_deriv(r))?
            }
        };
        let mut fpp_interp = Interpolator::new(method, np)?;
        fpp_interp.init(&staged_mesh, &fpp)?;

        Ok(Self {
            mesh: staged_mesh,
            f,
            fp,
            fpp,
            f_interp,
            fp_interp,
            fpp_interp,
            fpp_source,
        })
    }

    /// Value at `r`
    pub fn eval(&self, r: f64) -> f64 {
        self.extrapolate(r, &self.f)
            .unwrap_or_else(|| self.f_interp.eval(r))
    }

    /// First derivative at `r`
    pub fn eval_deriv(&self, r: f64) -> f64 {
        self.extrapolate(r, &self.fp)
            .unwrap_or_else(|| self.fp_interp.eval(r))
    }

    /// Second derivative at `r`
    pub fn eval_deriv2(&self, r: f64) -> f64 {
        self.extrapolate(r, &self.fpp)
            .unwrap_or_else(|| self.fpp_interp.eval(r))
    }

    /// Linear extrapolation through the two tabulated values closest to `r`,
    /// or `None` when `r` lies inside the mesh
    fn extrapolate(&self, r: f64, values: &[f64]) -> Option<f64> {
        let radii = self.mesh.r();
        let np = radii.len();
        if r < radii[0] {
            Some(linear_interpolate(r, radii[0], values[0], radii[1], values[1]))
        } else if r >= radii[np - 1] {
            Some(linear_interpolate(
                r,
                radii[np - 2],
                values[np - 2],
                radii[np - 1],
                values[np - 1],
            ))
        } else {
            None
        }
    }

    /// `Equal` when the meshes are equal and all three arrays match exactly
    pub fn compare(&self, other: &MeshFunction) -> Comparison {
        if self.mesh.compare(&other.mesh) != Comparison::Equal {
            return Comparison::Diff;
        }
        Comparison::from_equal(self.f == other.f && self.fp == other.fp && self.fpp == other.fpp)
    }

    /// Overwrite with a deep copy of `src`
    ///
    /// The interpolators are rebuilt with this mesh function's own method,
    /// which may differ from the one of `src`. On error the mesh function is
    /// left unchanged.
    pub fn copy_from(&mut self, src: &MeshFunction) -> Result<()> {
        *self = Self::build(
            self.interp_method(),
            self.fpp_source,
            &src.mesh,
            &src.f,
            Some(&src.fp),
            Some(&src.fpp),
        )?;
        Ok(())
    }

    /// Tabulated function values
    pub fn function(&self) -> &[f64] {
        &self.f
    }

    /// Tabulated first derivative
    pub fn deriv1(&self) -> &[f64] {
        &self.fp
    }

    /// Tabulated second derivative
    pub fn deriv2(&self) -> &[f64] {
        &self.fpp
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn np(&self) -> usize {
        self.mesh.np()
    }

    pub fn interp_method(&self) -> InterpolationMethod {
        self.f_interp.method()
    }

    pub fn second_derivative_source(&self) -> SecondDerivativeSource {
        self.fpp_source
    }
}

fn check_len(array: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(MeshFunctionError::LengthMismatch {
            array,
            expected,
            found,
        });
    }
    Ok(())
}

/// Evaluate `f` at every radius, reporting allocation failure
fn sample(radii: &[f64], f: impl Fn(f64) -> f64) -> Result<Vec<f64>> {
    let mut values = try_zeroed(radii.len())?;
    for (value, &r) in values.iter_mut().zip(radii) {
        *value = f(r);
    }
    Ok(values)
}
