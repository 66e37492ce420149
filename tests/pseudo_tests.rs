/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

use approx::assert_relative_eq;
use pspio_rs::mesh::{Mesh, MeshType};
use pspio_rs::meshfunc::MeshFunction;
use pspio_rs::pseudo::{
    NlccScheme, Potential, Projector, PseudoError, PspData, PspInfo, QuantumNumbers, State,
    WaveEquation, Xc,
};
use pspio_rs::utils::Comparison;
use rstest::rstest;

fn mesh() -> Mesh {
    Mesh::from_parameters(MeshType::Log1, 0.04, 0.005, 120).unwrap()
}

fn samples(mesh: &Mesh, f: impl Fn(f64) -> f64) -> Vec<f64> {
    mesh.r().iter().map(|&r| f(r)).collect()
}

/// Scalar-relativistic pseudopotential with s, p and d channels and a core correction
fn build() -> PspData {
    let mesh = mesh();
    let mut data = PspData::new();
    data.set_info(PspInfo {
        author: "generator test".to_string(),
        code: "atom".to_string(),
        description: "three-channel test data".to_string(),
        scheme_name: "TM".to_string(),
        generation_date: Some((2024, 5, 17)),
    });
    data.set_title("Ti test pseudopotential");
    data.set_symbol("Ti");
    data.set_z(22.0);
    data.set_zvalence(4.0);
    data.set_nelvalence(4.0);
    data.set_l_max(2);
    data.set_wave_equation(WaveEquation::ScalarRelativistic);

    let mut states = Vec::new();
    for (n, l, occupation) in [(4, 0, 2.0), (4, 1, 0.0), (3, 2, 2.0)] {
        let qn = QuantumNumbers::new(n, l, 0.0).unwrap();
        let wf = samples(&mesh, |r| r.powi(l) * (-r).exp());
        states.push(
            State::from_samples(qn, -0.2 * (l + 1) as f64, occupation, 2.0, &mesh, &wf, None)
                .unwrap(),
        );
        let v = samples(&mesh, |r| -4.0 / (r + 0.3) + 0.1 * l as f64);
        data.set_potential(Potential::new(qn, &mesh, &v).unwrap()).unwrap();
    }
    data.set_states(states);

    let projectors = (0..2)
        .map(|l| {
            let qn = QuantumNumbers::new(0, l, 0.0).unwrap();
            let p = samples(&mesh, |r| r.powi(l + 1) * (-r * r).exp());
            Projector::new(qn, 0.5 + l as f64, &mesh, &p).unwrap()
        })
        .collect();
    data.set_projectors(projectors);

    let local = QuantumNumbers::new(0, -1, 0.0).unwrap();
    let vlocal = samples(&mesh, |r| -4.0 * (1.0 - (-r).exp()) / r);
    data.set_vlocal(Some(2), Potential::new(local, &mesh, &vlocal).unwrap());

    let cd = MeshFunction::from_samples(&mesh, &samples(&mesh, |r| (-r * r).exp()), None, None)
        .unwrap();
    let xc = Xc::new(1, 12)
        .with_nlcc(NlccScheme::Louie, cd)
        .unwrap()
        .with_nlcc_prefactors(1.0, 0.5);
    data.set_xc(xc);

    let rho = samples(&mesh, |r| 4.0 * r * r * (-2.0 * r).exp());
    data.set_rho_valence(MeshFunction::from_samples(&mesh, &rho, None, None).unwrap());
    data.set_mesh(mesh);
    data
}

#[test]
fn test_accessors() {
    let data = build();
    assert_eq!(data.symbol(), "Ti");
    assert_eq!(data.wave_equation(), WaveEquation::ScalarRelativistic);
    assert_eq!(data.states().len(), 3);
    assert_eq!(data.n_potentials(), 3);
    assert_eq!(data.projectors().len(), 2);
    assert_eq!(data.l_local(), Some(2));
    assert_eq!(data.state(2).unwrap().label(), "3d");
    assert_eq!(data.state_index(3, 2, 0.0), Some(2));
    assert_eq!(data.states_table().lowest(1), Some(1));
    assert!(data.xc().has_nlcc());
    assert_eq!(data.xc().nlcc_scheme().code(), 1);

    let r = 0.8;
    assert_relative_eq!(
        data.potential_eval(1, 0.0, r).unwrap(),
        -4.0 / 1.1 + 0.1,
        max_relative = 1e-6
    );
    assert_relative_eq!(
        data.xc().nlcc_density_eval(r).unwrap(),
        (-r * r).exp(),
        max_relative = 1e-6
    );
    assert_relative_eq!(
        data.vlocal().unwrap().eval(r),
        -4.0 * (1.0 - (-r).exp()) / r,
        max_relative = 1e-6
    );
}

#[test]
fn test_clone_compares_equal_both_ways() {
    let data = build();
    let copy = data.clone();
    let again = copy.clone();

    assert!(data.compare(&copy).is_equal());
    assert!(copy.compare(&data).is_equal());
    assert!(again.compare(&data).is_equal());
}

#[rstest]
#[case::title(|d: &mut PspData| d.set_title("other"), "info")]
#[case::zvalence(|d: &mut PspData| d.set_zvalence(3.0), "info")]
#[case::mesh(|d: &mut PspData| {
    d.set_mesh(Mesh::from_parameters(MeshType::Log1, 0.041, 0.005, 120).unwrap());
}, "mesh")]
#[case::occupation(|d: &mut PspData| {
    let mut states = d.states().to_vec();
    states[0].set_occupation(1.0);
    d.set_states(states);
}, "states")]
#[case::xc(|d: &mut PspData| {
    let mut xc = d.xc().clone();
    xc.set_nlcc_scheme(NlccScheme::None);
    d.set_xc(xc);
}, "xc")]
fn test_single_change_is_reported(#[case] change: fn(&mut PspData), #[case] part: &str) {
    let data = build();
    let mut other = data.clone();
    change(&mut other);

    for report in [data.compare(&other), other.compare(&data)] {
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value[part], "diff", "part {}", part);
        assert_eq!(report.overall(), Comparison::Diff);
    }
}

#[test]
fn test_quantum_number_change_is_a_difference() {
    let data = build();
    let mesh = data.mesh().unwrap().clone();
    let mut other = data.clone();

    let mut states = data.states().to_vec();
    let qn = QuantumNumbers::new(5, 0, 0.0).unwrap();
    states[0] = State::new(
        qn,
        states[0].eigenvalue(),
        2.0,
        2.0,
        states[0].wf().clone(),
        Some("4s"),
    );
    other.set_states(states);
    assert_eq!(data.compare(&other).states, Comparison::Diff);
    assert_eq!(data.compare(&other).mesh, Comparison::Equal);

    let p = data.projectors()[0].clone();
    let qn = QuantumNumbers::new(1, 0, 0.0).unwrap();
    let moved = Projector::from_function(qn, p.energy(), p.function().clone());
    assert_eq!(p.compare(&moved), Comparison::Diff);
    assert_eq!(mesh.compare(p.function().mesh()), Comparison::Equal);
}

#[test]
fn test_relativistic_channels() {
    let mesh = mesh();
    let mut data = PspData::new();
    let v = samples(&mesh, |r| -1.0 / (r + 1.0));
    for (l, j) in [(0, 0.5), (1, 0.5), (1, 1.5)] {
        let qn = QuantumNumbers::new(1, l, j).unwrap();
        data.set_potential(Potential::new(qn, &mesh, &v).unwrap()).unwrap();
    }
    assert_eq!(data.n_potentials(), 3);
    assert!(data.potential(1, 1.5).is_some());
    assert_eq!(data.potential(1, 0.5).unwrap().qn().j(), 0.5);
    assert!(data.potential(2, 2.5).is_none());
}

#[rstest]
#[case(1, 0, 1.5)]
#[case(2, -2, 0.0)]
#[case(2, 1, 1.0)]
fn test_invalid_quantum_numbers(#[case] n: i32, #[case] l: i32, #[case] j: f64) {
    assert!(matches!(
        QuantumNumbers::new(n, l, j),
        Err(PseudoError::InvalidQuantumNumbers { .. })
    ));
}

#[test]
fn test_nlcc_codes() {
    for code in -1..=5 {
        let scheme = NlccScheme::try_from(code).unwrap();
        assert_eq!(scheme.code(), code);
    }
    assert!(matches!(
        NlccScheme::try_from(6),
        Err(PseudoError::InvalidNlccScheme(6))
    ));

    let mut xc = Xc::new(1, 12);
    assert!(!xc.has_nlcc());
    assert!(matches!(
        xc.set_nlcc_density(&mesh(), &[0.0; 120], None, None),
        Err(PseudoError::NlccDensityWithoutScheme)
    ));
    assert!(xc.nlcc_density_eval(0.1).is_none());
}
