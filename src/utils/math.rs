/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Small numerical helpers

/// Linear interpolation (or extrapolation) through two points
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to evaluate the line
/// * `x0`, `y0` - The first known point
/// * `x1`, `y1` - The second known point
///
/// # Returns
///
/// The value of the straight line through both points at `x`. When both
/// abscissas coincide, `y0` is returned.
pub fn linear_interpolate(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }

    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Whether `value` matches `reference` within a relative tolerance
///
/// The comparison is relative to `|reference|`; an exactly zero reference
/// only matches an exactly zero value.
pub fn within_tolerance(value: f64, reference: f64, tolerance: f64) -> bool {
    (value - reference).abs() <= tolerance * reference.abs()
}

/// Whether two values agree within a relative tolerance, symmetric in its
/// arguments
///
/// The bound is relative to the larger magnitude, so swapping `lhs` and
/// `rhs` never changes the answer.
pub fn close_relative(lhs: f64, rhs: f64, tolerance: f64) -> bool {
    lhs == rhs || (lhs - rhs).abs() <= tolerance * lhs.abs().max(rhs.abs())
}
