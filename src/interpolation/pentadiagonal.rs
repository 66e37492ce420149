/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Cubic spline whose second derivatives come from a pentadiagonal solve
//!
//! The knot equations express continuity of the first derivative at every
//! interior knot. Together with one boundary equation at each end they form
//! a banded system; boundary conditions such as not-a-knot couple three
//! unknowns, hence the pentadiagonal storage.
//!
//! Reference: C. de Boor, *A Practical Guide to Splines*, Springer (2001).

#![allow(clippy::needless_range_loop)]

use super::errors::{InterpolationError, Result};
use super::{check_knots, CubicSpline};
use crate::utils::try_zeroed;
use log::trace;

/// Condition imposed on one end of the spline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// The spline is a quadratic over the end interval
    Quadratic,
    /// Prescribed first derivative at the end knot
    FirstDerivative(f64),
    /// Prescribed second derivative at the end knot
    SecondDerivative(f64),
    /// Third derivative continuous at the knot next to the end
    NotAKnot,
}

impl BoundaryCondition {
    /// Zero second derivative, the natural spline
    pub const NATURAL: BoundaryCondition = BoundaryCondition::SecondDerivative(0.0);

    fn allows_linear_pair(self) -> bool {
        match self {
            BoundaryCondition::Quadratic => true,
            BoundaryCondition::SecondDerivative(value) => value == 0.0,
            _ => false,
        }
    }
}

/// Natural cubic spline with second derivatives solved from a pentadiagonal system
#[derive(Debug, Clone, Default)]
pub struct PentadiagonalSpline {
    t: Vec<f64>,
    y: Vec<f64>,
    ypp: Vec<f64>,
}

impl PentadiagonalSpline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the spline with explicit boundary conditions at both ends
    pub fn fit_with_boundary(
        &mut self,
        t: &[f64],
        y: &[f64],
        begin: BoundaryCondition,
        end: BoundaryCondition,
    ) -> Result<()> {
        check_knots(t, y)?;
        let n = t.len();
        // Both not-a-knot rows coincide on three knots
        let required = match (begin, end) {
            (BoundaryCondition::NotAKnot, BoundaryCondition::NotAKnot) => 4,
            (BoundaryCondition::NotAKnot, _) | (_, BoundaryCondition::NotAKnot) => 3,
            _ => 2,
        };
        if n < required {
            return Err(InterpolationError::TooFewPoints { required, found: n });
        }

        let ypp = if n == 2 && begin.allows_linear_pair() && end.allows_linear_pair() {
            // Straight line through both knots
            try_zeroed(2)?
        } else {
            let mut system = BandedSystem::new(n)?;
            system.set_first_row(t, y, begin);
            system.set_knot_rows(t, y);
            system.set_last_row(t, y, end);
            system.solve()?
        };

        self.t.clear();
        self.t.try_reserve_exact(n)?;
        self.t.extend_from_slice(t);
        self.y.clear();
        self.y.try_reserve_exact(n)?;
        self.y.extend_from_slice(y);
        self.ypp = ypp;

        trace!("Fitted pentadiagonal spline on {} knots", n);
        Ok(())
    }

    /// Second derivatives at the knots
    pub fn second_derivatives(&self) -> &[f64] {
        &self.ypp
    }

    /// Index of the interval used to evaluate at `x`
    ///
    /// This is the first `i` with `x < t[i+1]`, so points below the first
    /// knot use interval 0 and points at or beyond the last knot use the
    /// last interval.
    fn interval(&self, x: f64) -> usize {
        let n = self.t.len();
        (0..n - 1).find(|&i| x < self.t[i + 1]).unwrap_or(n - 2)
    }

    fn is_fitted(&self) -> bool {
        self.t.len() >= 2
    }
}

impl CubicSpline for PentadiagonalSpline {
    fn fit(&mut self, t: &[f64], y: &[f64]) -> Result<()> {
        self.fit_with_boundary(t, y, BoundaryCondition::NATURAL, BoundaryCondition::NATURAL)
    }

    fn eval(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (t, y, ypp) = (&self.t, &self.y, &self.ypp);
        let i = self.interval(x);
        let dt = x - t[i];
        let h = t[i + 1] - t[i];

        y[i] + dt
            * ((y[i + 1] - y[i]) / h - (ypp[i + 1] / 6.0 + ypp[i] / 3.0) * h
                + dt * (0.5 * ypp[i] + dt * ((ypp[i + 1] - ypp[i]) / (6.0 * h))))
    }

    fn eval_deriv(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (t, y, ypp) = (&self.t, &self.y, &self.ypp);
        let i = self.interval(x);
        let dt = x - t[i];
        let h = t[i + 1] - t[i];

        (y[i + 1] - y[i]) / h - (ypp[i + 1] / 6.0 + ypp[i] / 3.0) * h
            + dt * (ypp[i] + dt * (0.5 * (ypp[i + 1] - ypp[i]) / h))
    }

    fn eval_deriv2(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (t, ypp) = (&self.t, &self.ypp);
        let i = self.interval(x);
        let dt = x - t[i];
        let h = t[i + 1] - t[i];

        ypp[i] + dt * (ypp[i + 1] - ypp[i]) / h
    }

    fn len(&self) -> usize {
        self.t.len()
    }
}

/// Pentadiagonal matrix stored by diagonals, with its right-hand side
///
/// Row `i` holds `A(i,i-2)`, `A(i,i-1)`, `A(i,i)`, `A(i,i+1)` and `A(i,i+2)`
/// in `a1[i]` to `a5[i]`.
struct BandedSystem {
    a1: Vec<f64>,
    a2: Vec<f64>,
    a3: Vec<f64>,
    a4: Vec<f64>,
    a5: Vec<f64>,
    b: Vec<f64>,
}

impl BandedSystem {
    fn new(n: usize) -> Result<Self> {
        Ok(Self {
            a1: try_zeroed(n)?,
            a2: try_zeroed(n)?,
            a3: try_zeroed(n)?,
            a4: try_zeroed(n)?,
            a5: try_zeroed(n)?,
            b: try_zeroed(n)?,
        })
    }

    fn set_first_row(&mut self, t: &[f64], y: &[f64], condition: BoundaryCondition) {
        let h0 = t[1] - t[0];
        match condition {
            BoundaryCondition::Quadratic => {
                self.b[0] = 0.0;
                self.a3[0] = 1.0;
                self.a4[0] = -1.0;
            }
            BoundaryCondition::FirstDerivative(slope) => {
                self.b[0] = (y[1] - y[0]) / h0 - slope;
                self.a3[0] = h0 / 3.0;
                self.a4[0] = h0 / 6.0;
            }
            BoundaryCondition::SecondDerivative(value) => {
                self.b[0] = value;
                self.a3[0] = 1.0;
                self.a4[0] = 0.0;
            }
            BoundaryCondition::NotAKnot => {
                let h1 = t[2] - t[1];
                self.b[0] = 0.0;
                self.a3[0] = -h1;
                self.a4[0] = h0 + h1;
                self.a5[0] = -h0;
            }
        }
    }

    /// Continuity of the first derivative at the interior knots
    fn set_knot_rows(&mut self, t: &[f64], y: &[f64]) {
        let n = t.len();
        for i in 1..n - 1 {
            let h_left = t[i] - t[i - 1];
            let h_right = t[i + 1] - t[i];
            self.b[i] = (y[i + 1] - y[i]) / h_right - (y[i] - y[i - 1]) / h_left;
            self.a2[i] = h_left / 6.0;
            self.a3[i] = (h_left + h_right) / 3.0;
            self.a4[i] = h_right / 6.0;
        }
    }

    fn set_last_row(&mut self, t: &[f64], y: &[f64], condition: BoundaryCondition) {
        let n = t.len();
        let h = t[n - 1] - t[n - 2];
        match condition {
            BoundaryCondition::Quadratic => {
                self.b[n - 1] = 0.0;
                self.a2[n - 1] = -1.0;
                self.a3[n - 1] = 1.0;
            }
            BoundaryCondition::FirstDerivative(slope) => {
                self.b[n - 1] = slope - (y[n - 1] - y[n - 2]) / h;
                self.a2[n - 1] = h / 6.0;
                self.a3[n - 1] = h / 3.0;
            }
            BoundaryCondition::SecondDerivative(value) => {
                self.b[n - 1] = value;
                self.a2[n - 1] = 0.0;
                self.a3[n - 1] = 1.0;
            }
            BoundaryCondition::NotAKnot => {
                let h_prev = t[n - 2] - t[n - 3];
                self.b[n - 1] = 0.0;
                self.a1[n - 1] = -h;
                self.a2[n - 1] = h_prev + h;
                self.a3[n - 1] = -h_prev;
            }
        }
    }

    /// Diagonal entry of `row`, rejected when elimination cannot divide by it
    fn pivot(&self, row: usize) -> Result<f64> {
        let value = self.a3[row];
        if value == 0.0 || !value.is_finite() {
            return Err(InterpolationError::SingularSystem { row });
        }
        Ok(value)
    }

    /// Gaussian elimination without pivoting, then back substitution
    fn solve(mut self) -> Result<Vec<f64>> {
        let n = self.b.len();
        let mut x = try_zeroed(n)?;

        for i in 1..n - 1 {
            self.pivot(i - 1)?;
            let xmult = self.a2[i] / self.a3[i - 1];
            self.a3[i] -= xmult * self.a4[i - 1];
            self.a4[i] -= xmult * self.a5[i - 1];
            self.b[i] -= xmult * self.b[i - 1];

            let xmult = self.a1[i + 1] / self.a3[i - 1];
            self.a2[i + 1] -= xmult * self.a4[i - 1];
            self.a3[i + 1] -= xmult * self.a5[i - 1];
            self.b[i + 1] -= xmult * self.b[i - 1];
        }

        let xmult = self.a2[n - 1] / self.pivot(n - 2)?;
        self.a3[n - 1] -= xmult * self.a4[n - 2];
        x[n - 1] = (self.b[n - 1] - xmult * self.b[n - 2]) / self.pivot(n - 1)?;
        x[n - 2] = (self.b[n - 2] - self.a4[n - 2] * x[n - 1]) / self.a3[n - 2];
        for i in (0..n.saturating_sub(2)).rev() {
            x[i] = (self.b[i] - self.a4[i] * x[i + 1] - self.a5[i] * x[i + 2]) / self.a3[i];
        }

        Ok(x)
    }
}
