/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Electronic states of the reference atom

use super::errors::Result;
use super::qn::{lj_to_index, QuantumNumbers};
use crate::mesh::Mesh;
use crate::meshfunc::MeshFunction;
use crate::utils::Comparison;

/// A pseudo-atomic state and its radial wavefunction
#[derive(Debug, Clone)]
pub struct State {
    qn: QuantumNumbers,
    eigenvalue: f64,
    occupation: f64,
    rc: f64,
    label: String,
    wf: MeshFunction,
}

impl State {
    /// Create a state from an already built wavefunction
    ///
    /// Without an explicit label, the spectroscopic label of `qn` is used.
    pub fn new(
        qn: QuantumNumbers,
        eigenvalue: f64,
        occupation: f64,
        rc: f64,
        wf: MeshFunction,
        label: Option<&str>,
    ) -> Self {
        let label = label.map_or_else(|| qn.label(), str::to_string);
        Self {
            qn,
            eigenvalue,
            occupation,
            rc,
            label,
            wf,
        }
    }

    /// Create a state from wavefunction samples on `mesh`
    pub fn from_samples(
        qn: QuantumNumbers,
        eigenvalue: f64,
        occupation: f64,
        rc: f64,
        mesh: &Mesh,
        wf: &[f64],
        label: Option<&str>,
    ) -> Result<Self> {
        let wf = MeshFunction::from_samples(mesh, wf, None, None)?;
        Ok(Self::new(qn, eigenvalue, occupation, rc, wf, label))
    }

    pub fn qn(&self) -> &QuantumNumbers {
        &self.qn
    }

    pub fn eigenvalue(&self) -> f64 {
        self.eigenvalue
    }

    pub fn occupation(&self) -> f64 {
        self.occupation
    }

    pub fn set_occupation(&mut self, occupation: f64) {
        self.occupation = occupation;
    }

    /// Cutoff radius of the pseudo-wavefunction
    pub fn rc(&self) -> f64 {
        self.rc
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// Radial wavefunction
    pub fn wf(&self) -> &MeshFunction {
        &self.wf
    }

    pub fn wf_eval(&self, r: f64) -> f64 {
        self.wf.eval(r)
    }

    pub fn wf_eval_deriv(&self, r: f64) -> f64 {
        self.wf.eval_deriv(r)
    }

    pub fn wf_eval_deriv2(&self, r: f64) -> f64 {
        self.wf.eval_deriv2(r)
    }

    pub fn compare(&self, other: &State) -> Comparison {
        let same = self.qn.compare(&other.qn) == Comparison::Equal
            && self.eigenvalue == other.eigenvalue
            && self.occupation == other.occupation
            && self.rc == other.rc
            && self.label == other.label
            && self.wf.compare(&other.wf) == Comparison::Equal;
        Comparison::from_equal(same)
    }
}

/// Position of each state, indexed by `n` and the channel index `l + floor(j)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatesTable {
    rows: Vec<Vec<Option<usize>>>,
}

impl StatesTable {
    /// Build the table for `states`
    ///
    /// Rows run over `n = 0..=nmax`. Rows have `2 lmax + 1` entries when
    /// any state is relativistic and `lmax + 1` otherwise.
    pub fn new(states: &[State]) -> Self {
        if states.is_empty() {
            return Self::default();
        }

        let nmax = states.iter().map(|s| s.qn.n().max(0)).max().unwrap_or(0) as usize;
        let lmax = states.iter().map(|s| s.qn.l().max(0)).max().unwrap_or(0) as usize;
        let relativistic = states.iter().any(|s| s.qn.is_relativistic());
        let width = if relativistic { 2 * lmax + 1 } else { lmax + 1 };

        let mut rows = vec![vec![None; width]; nmax + 1];
        for (index, state) in states.iter().enumerate() {
            let (n, l, j) = (state.qn.n(), state.qn.l(), state.qn.j());
            if let (Ok(n), Some(lj)) = (usize::try_from(n), lj_to_index(l, j)) {
                rows[n][lj] = Some(index);
            }
        }

        Self { rows }
    }

    /// Index of the state with the given `n` and channel index, if any
    pub fn get(&self, n: usize, lj: usize) -> Option<usize> {
        self.rows.get(n)?.get(lj).copied().flatten()
    }

    /// First state, in increasing `n`, occupying channel `lj`
    pub fn lowest(&self, lj: usize) -> Option<usize> {
        (0..self.rows.len()).find_map(|n| self.get(n, lj))
    }

    /// Number of rows, `nmax + 1`
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of channel entries per row
    pub fn row_len(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshType;
    use approx::assert_relative_eq;

    fn mesh() -> Mesh {
        Mesh::from_parameters(MeshType::Log1, 1.0, 2.0, 8).unwrap()
    }

    fn state(n: i32, l: i32, j: f64) -> State {
        let mesh = mesh();
        let wf: Vec<f64> = mesh.r().iter().map(|r| 20.0 * (-r * r / 10.0).exp()).collect();
        let qn = QuantumNumbers::new(n, l, j).unwrap();
        State::from_samples(qn, -0.5, 2.0, 1.2, &mesh, &wf, None).unwrap()
    }

    #[test]
    fn test_default_label() {
        assert_eq!(state(2, 0, 0.5).label(), "2s0.5");
        assert_eq!(state(3, 2, 0.0).label(), "3d");

        let mut s = state(3, 2, 0.0);
        s.set_label("3d-semicore");
        assert_eq!(s.label(), "3d-semicore");
    }

    #[test]
    fn test_wavefunction_evaluation() {
        let s = state(1, 0, 0.0);
        assert_relative_eq!(s.wf_eval(0.01), 1.6456049569, epsilon = 1e-10);
        assert_relative_eq!(s.wf_eval_deriv(0.01), -0.15477352024, epsilon = 1e-10);
        assert_relative_eq!(s.wf_eval_deriv2(0.01), -5.8963771072e-3, epsilon = 1e-10);
    }

    #[test]
    fn test_compare() {
        let s = state(2, 1, 0.5);
        assert_eq!(s.compare(&s.clone()), Comparison::Equal);
        assert_eq!(s.compare(&state(3, 1, 0.5)), Comparison::Diff);

        let mut other = s.clone();
        other.set_occupation(1.0);
        assert_eq!(s.compare(&other), Comparison::Diff);
    }

    #[test]
    fn test_lookup_table() {
        let states = vec![state(2, 0, 0.5), state(3, 1, 0.5), state(3, 1, 1.5)];
        let table = StatesTable::new(&states);

        assert_eq!(table.n_rows(), 4);
        assert_eq!(table.row_len(), 3);
        for n in 0..4 {
            for lj in 0..3 {
                let expected = match (n, lj) {
                    (2, 0) => Some(0),
                    (3, 1) => Some(1),
                    (3, 2) => Some(2),
                    _ => None,
                };
                assert_eq!(table.get(n, lj), expected, "n = {}, lj = {}", n, lj);
            }
        }
        assert_eq!(table.lowest(1), Some(1));
        assert_eq!(table.get(7, 0), None);
    }

    #[test]
    fn test_non_relativistic_table_width() {
        let states = vec![state(1, 0, 0.0), state(2, 1, 0.0), state(3, 2, 0.0)];
        let table = StatesTable::new(&states);
        assert_eq!(table.row_len(), 3);
        assert_eq!(table.get(3, 2), Some(2));
        assert!(StatesTable::new(&[]).n_rows() == 0);
    }
}
