/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Mesh-type detection from raw radii
//!
//! Each matcher fits the generating parameters of one mesh type from the
//! leading points and accepts them only if every point is reproduced within
//! `MESH_TOLERANCE`. Matchers are tried in order: linear, log1, log2.

use super::MeshType;
use crate::utils::constants::MESH_TOLERANCE;
use crate::utils::within_tolerance;

/// A matcher returns the fitted `(a, b)` parameters when the radii match its mesh type
pub type Matcher = fn(&[f64]) -> Option<(f64, f64)>;

/// Matchers in the order in which they are tried
pub const MATCHERS: [(MeshType, Matcher); 3] = [
    (MeshType::Linear, match_linear),
    (MeshType::Log1, match_log1),
    (MeshType::Log2, match_log2),
];

/// Find the first mesh type that reproduces all radii
///
/// Returns `None` when no known type matches.
pub fn detect(r: &[f64]) -> Option<(MeshType, f64, f64)> {
    MATCHERS
        .iter()
        .find_map(|&(mesh_type, matcher)| matcher(r).map(|(a, b)| (mesh_type, a, b)))
}

/// Linear mesh, `r[i] = a(i+1) + b`
pub fn match_linear(r: &[f64]) -> Option<(f64, f64)> {
    if r.len() < 2 {
        return None;
    }

    let a = r[1] - r[0];
    let b = r[0] - a;
    reproduces(MeshType::Linear, a, b, r).then_some((a, b))
}

/// Logarithmic mesh, `r[i] = b exp(a(i+1))`
pub fn match_log1(r: &[f64]) -> Option<(f64, f64)> {
    if r.len() < 2 || r[0] <= 0.0 || r[1] <= 0.0 {
        return None;
    }

    let a = (r[1] / r[0]).ln();
    if !a.is_finite() || a == 0.0 {
        return None;
    }
    let b = r[0] / a.exp();
    reproduces(MeshType::Log1, a, b, r).then_some((a, b))
}

/// Shifted logarithmic mesh, `r[i] = b (exp(a(i+1)) - 1)`
///
/// Consecutive spacings of such a mesh grow by a constant factor `exp(a)`,
/// so the first three points determine both parameters.
pub fn match_log2(r: &[f64]) -> Option<(f64, f64)> {
    if r.len() < 3 {
        return None;
    }

    let ratio = (r[2] - r[1]) / (r[1] - r[0]);
    if !ratio.is_finite() || ratio <= 0.0 || ratio == 1.0 {
        return None;
    }

    let a = ratio.ln();
    let b = (r[1] - r[0]) / ((2.0 * a).exp() - a.exp());
    if !b.is_finite() {
        return None;
    }
    reproduces(MeshType::Log2, a, b, r).then_some((a, b))
}

fn reproduces(mesh_type: MeshType, a: f64, b: f64, r: &[f64]) -> bool {
    r.iter().enumerate().all(|(i, &ri)| match mesh_type.point(a, b, i) {
        Some((generated, _)) => within_tolerance(generated, ri, MESH_TOLERANCE),
        None => false,
    })
}
