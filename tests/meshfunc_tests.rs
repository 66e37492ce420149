/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

use approx::assert_relative_eq;
use pspio_rs::interpolation::{InterpolationMethod, Interpolator};
use pspio_rs::mesh::{Mesh, MeshType};
use pspio_rs::meshfunc::{MeshFunction, MeshFunctionError, SecondDerivativeSource};
use pspio_rs::utils::{linear_interpolate, Comparison};

fn mesh() -> Mesh {
    Mesh::from_parameters(MeshType::Log1, 0.08, 0.01, 80).unwrap()
}

fn decaying(mesh: &Mesh) -> MeshFunction {
    let f: Vec<f64> = mesh.r().iter().map(|r| r.sqrt() * (-r).exp()).collect();
    MeshFunction::from_samples(mesh, &f, None, None).unwrap()
}

#[test]
fn test_extrapolation_is_linear_outside_mesh() {
    let mesh = mesh();
    let function = decaying(&mesh);
    let (r, np) = (mesh.r(), mesh.np());

    let mut spline = Interpolator::new(InterpolationMethod::Pentadiagonal, np).unwrap();
    spline.init(&mesh, function.function()).unwrap();

    for &x in &[0.5 * r[0], -0.2] {
        let expected = linear_interpolate(x, r[0], function.function()[0], r[1], function.function()[1]);
        assert_eq!(function.eval(x), expected);
        assert!((spline.eval(x) - expected).abs() > 1e-12);

        let expected = linear_interpolate(x, r[0], function.deriv1()[0], r[1], function.deriv1()[1]);
        assert_eq!(function.eval_deriv(x), expected);
    }

    for &x in &[r[np - 1], r[np - 1] * 1.5] {
        let expected = linear_interpolate(
            x,
            r[np - 2],
            function.function()[np - 2],
            r[np - 1],
            function.function()[np - 1],
        );
        assert_eq!(function.eval(x), expected);

        let expected = linear_interpolate(
            x,
            r[np - 2],
            function.deriv2()[np - 2],
            r[np - 1],
            function.deriv2()[np - 1],
        );
        assert_eq!(function.eval_deriv2(x), expected);
    }
}

#[test]
fn test_interior_uses_spline() {
    let mesh = mesh();
    let function = decaying(&mesh);
    for &x in &[0.05, 0.5, 2.0] {
        assert_relative_eq!(function.eval(x), x.sqrt() * (-x).exp(), max_relative = 1e-5);
    }
}

#[test]
fn test_second_derivative_sources_differ() {
    let mesh = mesh();
    let f: Vec<f64> = mesh.r().iter().map(|r| r.sqrt() * (-r).exp()).collect();

    let from_f = MeshFunction::from_samples(&mesh, &f, None, None).unwrap();
    let mut from_fp = MeshFunction::new(mesh.np())
        .unwrap()
        .with_second_derivative_source(SecondDerivativeSource::DerivativeSpline);
    from_fp.init(&mesh, &f, None, None).unwrap();

    assert_eq!(from_f.function(), from_fp.function());
    assert_eq!(from_f.deriv1(), from_fp.deriv1());
    assert_ne!(from_f.deriv2(), from_fp.deriv2());
    assert_eq!(from_f.compare(&from_fp), Comparison::Diff);

    // Both approximate f'' inside the mesh, re-splining fp more closely
    let x: f64 = 1.0;
    let exact = (-0.25 / x.powf(1.5) - 1.0 / x.sqrt() + x.sqrt()) * (-x).exp();
    let error_f = (from_f.eval_deriv2(x) - exact).abs();
    let error_fp = (from_fp.eval_deriv2(x) - exact).abs();
    assert!(error_f < 2e-2 * exact.abs());
    assert!(error_fp < error_f);
}

#[test]
fn test_copy_idempotence() {
    let mesh = mesh();
    let src = decaying(&mesh);

    for np in [2, mesh.np(), 2 * mesh.np()] {
        let mut first = MeshFunction::new(np).unwrap();
        first.copy_from(&src).unwrap();
        let mut second = MeshFunction::new(5).unwrap();
        second.copy_from(&first).unwrap();

        assert_eq!(second.compare(&src), Comparison::Equal);
        assert_eq!(src.compare(&second), Comparison::Equal);
        assert_eq!(second.eval(0.7), src.eval(0.7));
    }
}

#[test]
fn test_single_point_difference() {
    let mesh = mesh();
    let src = decaying(&mesh);

    let mut f = src.function().to_vec();
    f[40] *= 1.0 + 1e-12;
    let other = MeshFunction::from_samples(&mesh, &f, Some(src.deriv1()), Some(src.deriv2()))
        .unwrap();
    assert_eq!(src.compare(&other), Comparison::Diff);
    assert_eq!(other.compare(&src), Comparison::Diff);

    let shifted = Mesh::from_parameters(MeshType::Log1, 0.08, 0.0101, 80).unwrap();
    let moved = MeshFunction::from_samples(
        &shifted,
        src.function(),
        Some(src.deriv1()),
        Some(src.deriv2()),
    )
    .unwrap();
    assert_eq!(src.compare(&moved), Comparison::Diff);
}

#[test]
fn test_rejects_wrong_lengths() {
    let mesh = mesh();
    let result = MeshFunction::from_samples(&mesh, &[1.0; 10], None, None);
    assert!(matches!(
        result,
        Err(MeshFunctionError::LengthMismatch { array: "f", expected: 80, found: 10 })
    ));
}
