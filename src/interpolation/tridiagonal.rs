/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Natural cubic spline solved by a tridiagonal sweep, with interval caching
//!
//! Successive evaluations on a radial grid usually fall in the same or a
//! neighbouring interval, so the last interval found is remembered and
//! checked before falling back to a binary search.

use super::errors::Result;
use super::{check_knots, CubicSpline};
use crate::utils::try_zeroed;
use log::trace;
use std::cell::Cell;

/// Natural cubic spline with a cached bracketing interval
#[derive(Debug, Clone, Default)]
pub struct TridiagonalSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    y2s: Vec<f64>,
    cache: Cell<usize>,
}

impl TridiagonalSpline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Second derivatives at the knots
    pub fn second_derivatives(&self) -> &[f64] {
        &self.y2s
    }

    /// Interval `[xs[i], xs[i+1])` containing `x`, clamped to the end intervals
    fn interval(&self, x: f64) -> usize {
        let n = self.xs.len();
        let cached = self.cache.get();
        if cached + 1 < n && self.contains(cached, x) {
            return cached;
        }
        if cached + 2 < n && self.contains(cached + 1, x) {
            self.cache.set(cached + 1);
            return cached + 1;
        }

        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        self.cache.set(lo);
        lo
    }

    /// Whether interval `i` is the one selected for `x`
    fn contains(&self, i: usize, x: f64) -> bool {
        let n = self.xs.len();
        let above_start = i == 0 || x >= self.xs[i];
        let below_end = i == n - 2 || x < self.xs[i + 1];
        above_start && below_end
    }

    fn is_fitted(&self) -> bool {
        self.xs.len() >= 2
    }

    /// Interval index, its width and the two interpolation weights
    fn weights(&self, x: f64) -> (usize, f64, f64, f64) {
        let lo = self.interval(x);
        let h = self.xs[lo + 1] - self.xs[lo];
        let a = (self.xs[lo + 1] - x) / h;
        let b = (x - self.xs[lo]) / h;
        (lo, h, a, b)
    }
}

impl CubicSpline for TridiagonalSpline {
    fn fit(&mut self, t: &[f64], y: &[f64]) -> Result<()> {
        check_knots(t, y)?;
        let (xs, ys) = (t, y);
        let n = xs.len();
        let mut y2s = try_zeroed(n)?;
        let mut u = try_zeroed(n - 1)?;

        // Forward sweep
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution, natural ends
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        self.xs.clear();
        self.xs.try_reserve_exact(n)?;
        self.xs.extend_from_slice(xs);
        self.ys.clear();
        self.ys.try_reserve_exact(n)?;
        self.ys.extend_from_slice(ys);
        self.y2s = y2s;
        self.cache.set(0);

        trace!("Fitted tridiagonal spline on {} knots", n);
        Ok(())
    }

    fn eval(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (lo, h, a, b) = self.weights(x);
        let hi = lo + 1;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }

    fn eval_deriv(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (lo, h, a, b) = self.weights(x);
        let hi = lo + 1;

        (self.ys[hi] - self.ys[lo]) / h - (3.0 * a * a - 1.0) / 6.0 * h * self.y2s[lo]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.y2s[hi]
    }

    fn eval_deriv2(&self, x: f64) -> f64 {
        if !self.is_fitted() {
            return 0.0;
        }
        let (lo, _, a, b) = self.weights(x);

        a * self.y2s[lo] + b * self.y2s[lo + 1]
    }

    fn len(&self) -> usize {
        self.xs.len()
    }
}
