/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! The pseudopotential data aggregate

use super::errors::{PseudoError, Result};
use super::potential::Potential;
use super::projector::Projector;
use super::qn::lj_to_index;
use super::state::{State, StatesTable};
use super::xc::Xc;
use crate::io::Format;
use crate::mesh::Mesh;
use crate::meshfunc::MeshFunction;
use crate::utils::Comparison;
use serde::{Deserialize, Serialize};

/// Equation solved for the reference atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveEquation {
    #[default]
    Schrodinger,
    ScalarRelativistic,
    Dirac,
}

/// Provenance of a pseudopotential
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PspInfo {
    pub author: String,
    pub code: String,
    pub description: String,
    /// Generation scheme, e.g. "TM" or "HGH"
    pub scheme_name: String,
    /// Generation date as (year, month, day)
    pub generation_date: Option<(i32, u32, u32)>,
}

/// Pseudopotential data read from or written to a file
#[derive(Debug, Clone, Default)]
pub struct PspData {
    info: PspInfo,
    title: String,
    symbol: String,
    z: f64,
    zvalence: f64,
    nelvalence: f64,
    l_max: i32,
    wave_eq: WaveEquation,
    mesh: Option<Mesh>,
    states: Vec<State>,
    states_table: StatesTable,
    potentials: Vec<Option<Potential>>,
    projectors: Vec<Projector>,
    l_local: Option<i32>,
    vlocal: Option<Potential>,
    xc: Xc,
    rho_valence: Option<MeshFunction>,
    format_guessed: Option<Format>,
}

/// Part-by-part comparison of two [`PspData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PspDataComparison {
    pub info: Comparison,
    pub mesh: Comparison,
    pub states: Comparison,
    pub potentials: Comparison,
    pub projectors: Comparison,
    pub vlocal: Comparison,
    pub xc: Comparison,
    pub rho_valence: Comparison,
}

impl PspDataComparison {
    /// Worst result over all parts
    pub fn overall(&self) -> Comparison {
        [
            self.info,
            self.mesh,
            self.states,
            self.potentials,
            self.projectors,
            self.vlocal,
            self.xc,
            self.rho_valence,
        ]
        .into_iter()
        .fold(Comparison::Equal, Comparison::and)
    }

    pub fn is_equal(&self) -> bool {
        self.overall() == Comparison::Equal
    }
}

impl PspData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn info(&self) -> &PspInfo {
        &self.info
    }

    pub fn set_info(&mut self, info: PspInfo) {
        self.info = info;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Chemical symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.to_string();
    }

    /// Atomic number
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Charge of the pseudo-ion
    pub fn zvalence(&self) -> f64 {
        self.zvalence
    }

    pub fn set_zvalence(&mut self, zvalence: f64) {
        self.zvalence = zvalence;
    }

    /// Number of valence electrons
    pub fn nelvalence(&self) -> f64 {
        self.nelvalence
    }

    pub fn set_nelvalence(&mut self, nelvalence: f64) {
        self.nelvalence = nelvalence;
    }

    /// Highest angular momentum channel
    pub fn l_max(&self) -> i32 {
        self.l_max
    }

    pub fn set_l_max(&mut self, l_max: i32) {
        self.l_max = l_max;
    }

    pub fn wave_equation(&self) -> WaveEquation {
        self.wave_eq
    }

    pub fn set_wave_equation(&mut self, wave_eq: WaveEquation) {
        self.wave_eq = wave_eq;
    }

    /// Mesh on which all functions are tabulated
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = Some(mesh);
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    /// Replace the states and rebuild the quantum-number lookup table
    pub fn set_states(&mut self, states: Vec<State>) {
        self.states_table = StatesTable::new(&states);
        self.states = states;
    }

    pub fn states_table(&self) -> &StatesTable {
        &self.states_table
    }

    /// Index of the state with quantum numbers `(n, l, j)`
    pub fn state_index(&self, n: i32, l: i32, j: f64) -> Option<usize> {
        let n = usize::try_from(n).ok()?;
        self.states_table.get(n, lj_to_index(l, j)?)
    }

    /// Store a potential in the slot of its channel, replacing any previous one
    pub fn set_potential(&mut self, potential: Potential) -> Result<()> {
        let qn = *potential.qn();
        let index = qn.lj_index().ok_or(PseudoError::NoChannelIndex(qn.l()))?;
        if self.potentials.len() <= index {
            self.potentials.resize_with(index + 1, || None);
        }
        self.potentials[index] = Some(potential);
        Ok(())
    }

    /// Potential of channel `(l, j)`
    pub fn potential(&self, l: i32, j: f64) -> Option<&Potential> {
        self.potentials.get(lj_to_index(l, j)?)?.as_ref()
    }

    /// All potentials in channel order
    pub fn potentials(&self) -> impl Iterator<Item = &Potential> {
        self.potentials.iter().flatten()
    }

    pub fn n_potentials(&self) -> usize {
        self.potentials().count()
    }

    /// Value of the potential of channel `(l, j)` at `r`
    pub fn potential_eval(&self, l: i32, j: f64, r: f64) -> Option<f64> {
        self.potential(l, j).map(|potential| potential.eval(r))
    }

    pub fn projectors(&self) -> &[Projector] {
        &self.projectors
    }

    pub fn set_projectors(&mut self, projectors: Vec<Projector>) {
        self.projectors = projectors;
    }

    /// Angular momentum of the local channel
    pub fn l_local(&self) -> Option<i32> {
        self.l_local
    }

    pub fn vlocal(&self) -> Option<&Potential> {
        self.vlocal.as_ref()
    }

    /// Set the local potential of the Kleinman-Bylander form
    pub fn set_vlocal(&mut self, l_local: Option<i32>, vlocal: Potential) {
        self.l_local = l_local;
        self.vlocal = Some(vlocal);
    }

    pub fn xc(&self) -> &Xc {
        &self.xc
    }

    pub fn set_xc(&mut self, xc: Xc) {
        self.xc = xc;
    }

    pub fn rho_valence(&self) -> Option<&MeshFunction> {
        self.rho_valence.as_ref()
    }

    pub fn set_rho_valence(&mut self, rho: MeshFunction) {
        self.rho_valence = Some(rho);
    }

    /// Format detected when the file was read without an explicit format
    pub fn format_guessed(&self) -> Option<Format> {
        self.format_guessed
    }

    pub(crate) fn set_format_guessed(&mut self, format: Option<Format>) {
        self.format_guessed = format;
    }

    /// Compare every part of two data sets
    pub fn compare(&self, other: &PspData) -> PspDataComparison {
        let info = self.info == other.info
            && self.title == other.title
            && self.symbol == other.symbol
            && self.z == other.z
            && self.zvalence == other.zvalence
            && self.nelvalence == other.nelvalence
            && self.l_max == other.l_max
            && self.wave_eq == other.wave_eq;

        let states = self.states.len() == other.states.len()
            && self
                .states
                .iter()
                .zip(&other.states)
                .all(|(lhs, rhs)| lhs.compare(rhs) == Comparison::Equal);

        let potentials = self.potentials.len() == other.potentials.len()
            && self.potentials.iter().zip(&other.potentials).all(|(lhs, rhs)| {
                Comparison::optional(lhs.as_ref(), rhs.as_ref(), Potential::compare).is_equal()
            });

        let projectors = self.projectors.len() == other.projectors.len()
            && self
                .projectors
                .iter()
                .zip(&other.projectors)
                .all(|(lhs, rhs)| lhs.compare(rhs) == Comparison::Equal);

        let vlocal = self.l_local == other.l_local
            && Comparison::optional(self.vlocal.as_ref(), other.vlocal.as_ref(), Potential::compare)
                .is_equal();

        PspDataComparison {
            info: Comparison::from_equal(info),
            mesh: Comparison::optional(self.mesh.as_ref(), other.mesh.as_ref(), Mesh::compare),
            states: Comparison::from_equal(states),
            potentials: Comparison::from_equal(potentials),
            projectors: Comparison::from_equal(projectors),
            vlocal: Comparison::from_equal(vlocal),
            xc: self.xc.compare(&other.xc),
            rho_valence: Comparison::optional(
                self.rho_valence.as_ref(),
                other.rho_valence.as_ref(),
                MeshFunction::compare,
            ),
        }
    }
}
