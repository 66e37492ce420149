/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Cubic-spline interpolation on radial meshes
//!
//! Two interchangeable spline backends implement [`CubicSpline`]:
//!
//! - [`PentadiagonalSpline`]: second derivatives from a banded
//!   pentadiagonal solve, linear-scan interval lookup. Default.
//! - [`TridiagonalSpline`]: tridiagonal sweep for natural boundaries, cached
//!   interval lookup with binary-search fallback.
//!
//! Both extrapolate with the cubic of the nearest end interval. The
//! [`Interpolator`] binds the backend chosen at run time to a mesh.

pub mod errors;
pub mod pentadiagonal;
pub mod tridiagonal;

pub use errors::{InterpolationError, Result};
pub use pentadiagonal::{BoundaryCondition, PentadiagonalSpline};
pub use tridiagonal::TridiagonalSpline;

use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fit and evaluate a cubic spline through `(t, y)` samples
pub trait CubicSpline {
    /// Fit the spline through the knots `t` and values `y`
    ///
    /// The knots must be strictly increasing and there must be at least two.
    fn fit(&mut self, t: &[f64], y: &[f64]) -> Result<()>;

    /// Value at `x`. An unfitted spline evaluates to zero.
    fn eval(&self, x: f64) -> f64;

    /// First derivative at `x`
    fn eval_deriv(&self, x: f64) -> f64;

    /// Second derivative at `x`
    fn eval_deriv2(&self, x: f64) -> f64;

    /// Number of knots, zero before fitting
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate spline input: matching lengths, two knots or more, strictly increasing
pub(crate) fn check_knots(t: &[f64], y: &[f64]) -> Result<()> {
    if t.len() != y.len() {
        return Err(InterpolationError::LengthMismatch {
            expected: t.len(),
            found: y.len(),
        });
    }
    if t.len() < 2 {
        return Err(InterpolationError::TooFewPoints {
            required: 2,
            found: t.len(),
        });
    }
    let increasing = |pair: &[f64]| pair[1].partial_cmp(&pair[0]) == Some(Ordering::Greater);
    if let Some(index) = t.windows(2).position(|pair| !increasing(pair)) {
        return Err(InterpolationError::NotStrictlyIncreasing {
            index,
            left: t[index],
            right: t[index + 1],
        });
    }
    Ok(())
}

/// Spline backend used by an interpolator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    #[default]
    Pentadiagonal,
    Tridiagonal,
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationMethod::Pentadiagonal => write!(f, "pentadiagonal"),
            InterpolationMethod::Tridiagonal => write!(f, "tridiagonal"),
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pentadiagonal" | "penta" | "jb" => Ok(InterpolationMethod::Pentadiagonal),
            "tridiagonal" | "tri" | "cached" => Ok(InterpolationMethod::Tridiagonal),
            other => Err(InterpolationError::UnsupportedMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    Pentadiagonal(PentadiagonalSpline),
    Tridiagonal(TridiagonalSpline),
}

impl Backend {
    fn new(method: InterpolationMethod) -> Self {
        match method {
            InterpolationMethod::Pentadiagonal => Backend::Pentadiagonal(PentadiagonalSpline::new()),
            InterpolationMethod::Tridiagonal => Backend::Tridiagonal(TridiagonalSpline::new()),
        }
    }

    fn spline(&self) -> &dyn CubicSpline {
        match self {
            Backend::Pentadiagonal(spline) => spline,
            Backend::Tridiagonal(spline) => spline,
        }
    }

    fn spline_mut(&mut self) -> &mut dyn CubicSpline {
        match self {
            Backend::Pentadiagonal(spline) => spline,
            Backend::Tridiagonal(spline) => spline,
        }
    }
}

/// A spline backend bound to a mesh
///
/// Evaluation outside the mesh is left to the backend, which extends the
/// end cubics.
#[derive(Debug, Clone)]
pub struct Interpolator {
    method: InterpolationMethod,
    np: usize,
    backend: Backend,
}

impl Interpolator {
    /// Create an interpolator for meshes of `np` points
    pub fn new(method: InterpolationMethod, np: usize) -> Result<Self> {
        if np < 2 {
            return Err(InterpolationError::TooFewPoints {
                required: 2,
                found: np,
            });
        }

        Ok(Self {
            method,
            np,
            backend: Backend::new(method),
        })
    }

    /// Fit the spline through `f` tabulated on `mesh`
    pub fn init(&mut self, mesh: &Mesh, f: &[f64]) -> Result<()> {
        if mesh.np() != self.np {
            return Err(InterpolationError::LengthMismatch {
                expected: self.np,
                found: mesh.np(),
            });
        }
        self.backend.spline_mut().fit(mesh.r(), f)
    }

    pub fn eval(&self, r: f64) -> f64 {
        self.backend.spline().eval(r)
    }

    pub fn eval_deriv(&self, r: f64) -> f64 {
        self.backend.spline().eval_deriv(r)
    }

    pub fn eval_deriv2(&self, r: f64) -> f64 {
        self.backend.spline().eval_deriv2(r)
    }

    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Number of mesh points this interpolator was created for
    pub fn np(&self) -> usize {
        self.np
    }

    /// Whether `init` has been called successfully
    pub fn is_initialized(&self) -> bool {
        !self.backend.spline().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshType;
    use approx::assert_relative_eq;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "jb".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Pentadiagonal
        );
        assert_eq!(
            "Tridiagonal".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Tridiagonal
        );
        assert!(matches!(
            "akima".parse::<InterpolationMethod>(),
            Err(InterpolationError::UnsupportedMethod(_))
        ));
        assert_eq!(InterpolationMethod::default().to_string(), "pentadiagonal");
    }

    #[test]
    fn test_interpolator_on_log_mesh() {
        let mesh = Mesh::from_parameters(MeshType::Log1, 1.0, 2.0, 8).unwrap();
        let f: Vec<f64> = mesh.r().iter().map(|&r| 20.0 * (-r * r / 10.0).exp()).collect();

        for method in [InterpolationMethod::Pentadiagonal, InterpolationMethod::Tridiagonal] {
            let mut interp = Interpolator::new(method, 8).unwrap();
            assert!(!interp.is_initialized());
            assert_eq!(interp.eval(1.0), 0.0);

            interp.init(&mesh, &f).unwrap();
            assert!(interp.is_initialized());
            assert_eq!(interp.method(), method);
            for (&r, &value) in mesh.r().iter().zip(&f) {
                assert_relative_eq!(interp.eval(r), value, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_interpolator_rejects_other_meshes() {
        let mesh = Mesh::from_parameters(MeshType::Linear, 0.1, 0.0, 5).unwrap();
        let mut interp = Interpolator::new(InterpolationMethod::Pentadiagonal, 4).unwrap();
        assert!(matches!(
            interp.init(&mesh, &[0.0; 5]),
            Err(InterpolationError::LengthMismatch { .. })
        ));
        assert!(Interpolator::new(InterpolationMethod::Tridiagonal, 1).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let mesh = Mesh::from_parameters(MeshType::Linear, 0.5, 0.0, 6).unwrap();
        let f: Vec<f64> = mesh.r().iter().map(|&r| r * r).collect();
        let mut interp = Interpolator::new(InterpolationMethod::Tridiagonal, 6).unwrap();
        interp.init(&mesh, &f).unwrap();

        let copy = interp.clone();
        let g: Vec<f64> = mesh.r().iter().map(|&r| -r).collect();
        interp.init(&mesh, &g).unwrap();

        assert_relative_eq!(copy.eval(1.5), 2.25, epsilon = 1e-2);
        assert_relative_eq!(interp.eval(1.5), -1.5, epsilon = 1e-12);
    }
}
