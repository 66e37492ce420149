/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Exchange-correlation data and non-linear core corrections

use super::errors::{PseudoError, Result};
use crate::mesh::Mesh;
use crate::meshfunc::MeshFunction;
use crate::utils::Comparison;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme of the non-linear core correction (NLCC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NlccScheme {
    /// No core correction
    #[default]
    None,
    /// Core correction of unidentified origin
    Unknown,
    /// Louie, Froyen and Cohen, Phys. Rev. B 26, 1738 (1982)
    Louie,
    /// Fuchs and Scheffler, Comp. Phys. Comm. 119, 67 (1999)
    Fhi,
    /// Teter model as used by ABINIT pspcod 4
    Teter1,
    /// Teter model as used by ABINIT pspcod 1
    Teter2,
    /// Core density from the ATOM code
    Atom,
}

impl NlccScheme {
    /// Integer code used by pseudopotential files
    pub fn code(self) -> i32 {
        match self {
            NlccScheme::None => -1,
            NlccScheme::Unknown => 0,
            NlccScheme::Louie => 1,
            NlccScheme::Fhi => 2,
            NlccScheme::Teter1 => 3,
            NlccScheme::Teter2 => 4,
            NlccScheme::Atom => 5,
        }
    }
}

impl TryFrom<i32> for NlccScheme {
    type Error = PseudoError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            -1 => Ok(NlccScheme::None),
            0 => Ok(NlccScheme::Unknown),
            1 => Ok(NlccScheme::Louie),
            2 => Ok(NlccScheme::Fhi),
            3 => Ok(NlccScheme::Teter1),
            4 => Ok(NlccScheme::Teter2),
            5 => Ok(NlccScheme::Atom),
            other => Err(PseudoError::InvalidNlccScheme(other)),
        }
    }
}

impl fmt::Display for NlccScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Exchange-correlation functional identifiers and core correction
///
/// Functionals are referred to by their libxc identifiers; 0 means none.
#[derive(Debug, Clone, Default)]
pub struct Xc {
    exchange: i32,
    correlation: i32,
    nlcc_scheme: NlccScheme,
    nlcc_pf_scale: f64,
    nlcc_pf_value: f64,
    nlcc_density: Option<MeshFunction>,
}

impl Xc {
    /// Functionals without core correction
    pub fn new(exchange: i32, correlation: i32) -> Self {
        Self {
            exchange,
            correlation,
            ..Self::default()
        }
    }

    /// Attach a core correction with its density
    pub fn with_nlcc(mut self, scheme: NlccScheme, density: MeshFunction) -> Result<Self> {
        self.set_nlcc_scheme(scheme);
        self.set_nlcc_density_function(density)?;
        Ok(self)
    }

    /// Set the prefactor scale and value of the core density model
    pub fn with_nlcc_prefactors(mut self, scale: f64, value: f64) -> Self {
        self.nlcc_pf_scale = scale;
        self.nlcc_pf_value = value;
        self
    }

    pub fn exchange(&self) -> i32 {
        self.exchange
    }

    pub fn set_exchange(&mut self, exchange: i32) {
        self.exchange = exchange;
    }

    pub fn correlation(&self) -> i32 {
        self.correlation
    }

    pub fn set_correlation(&mut self, correlation: i32) {
        self.correlation = correlation;
    }

    pub fn nlcc_scheme(&self) -> NlccScheme {
        self.nlcc_scheme
    }

    /// Change the core correction scheme; `NlccScheme::None` drops the density
    pub fn set_nlcc_scheme(&mut self, scheme: NlccScheme) {
        self.nlcc_scheme = scheme;
        if scheme == NlccScheme::None {
            self.nlcc_density = None;
        }
    }

    /// Set the scheme from its integer code
    pub fn set_nlcc_scheme_code(&mut self, code: i32) -> Result<()> {
        self.set_nlcc_scheme(NlccScheme::try_from(code)?);
        Ok(())
    }

    pub fn nlcc_pf_scale(&self) -> f64 {
        self.nlcc_pf_scale
    }

    pub fn nlcc_pf_value(&self) -> f64 {
        self.nlcc_pf_value
    }

    /// Tabulate the core density on `mesh`
    pub fn set_nlcc_density(
        &mut self,
        mesh: &Mesh,
        cd: &[f64],
        cdp: Option<&[f64]>,
        cdpp: Option<&[f64]>,
    ) -> Result<()> {
        let density = MeshFunction::from_samples(mesh, cd, cdp, cdpp)?;
        self.set_nlcc_density_function(density)
    }

    /// Use an already built core density
    pub fn set_nlcc_density_function(&mut self, density: MeshFunction) -> Result<()> {
        if self.nlcc_scheme == NlccScheme::None {
            return Err(PseudoError::NlccDensityWithoutScheme);
        }
        self.nlcc_density = Some(density);
        Ok(())
    }

    pub fn has_nlcc(&self) -> bool {
        self.nlcc_scheme != NlccScheme::None
    }

    pub fn nlcc_density(&self) -> Option<&MeshFunction> {
        self.nlcc_density.as_ref()
    }

    /// Core density at `r`, `None` without core correction
    pub fn nlcc_density_eval(&self, r: f64) -> Option<f64> {
        self.nlcc_density.as_ref().map(|density| density.eval(r))
    }

    pub fn nlcc_density_eval_deriv(&self, r: f64) -> Option<f64> {
        self.nlcc_density.as_ref().map(|density| density.eval_deriv(r))
    }

    pub fn nlcc_density_eval_deriv2(&self, r: f64) -> Option<f64> {
        self.nlcc_density.as_ref().map(|density| density.eval_deriv2(r))
    }

    pub fn compare(&self, other: &Xc) -> Comparison {
        let same_header = self.exchange == other.exchange
            && self.correlation == other.correlation
            && self.nlcc_scheme == other.nlcc_scheme
            && self.nlcc_pf_scale == other.nlcc_pf_scale
            && self.nlcc_pf_value == other.nlcc_pf_value;
        if !same_header {
            return Comparison::Diff;
        }
        Comparison::optional(
            self.nlcc_density.as_ref(),
            other.nlcc_density.as_ref(),
            MeshFunction::compare,
        )
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

    fn density(mesh: &Mesh, height: f64, width: f64) -> Vec<f64> {
        mesh.r().iter().map(|r| height * (-r * r / width).exp()).collect()
    }

    fn xc_with_core(exchange: i32, scheme: NlccScheme, cd: &[f64]) -> Xc {
        let mut xc = Xc::new(exchange, 4).with_nlcc_prefactors(4.0, 1.0);
        xc.set_nlcc_scheme(scheme);
        xc.set_nlcc_density(&mesh(), cd, None, None).unwrap();
        xc
    }

    #[test]
    fn test_scheme_codes() {
        assert!(matches!(
            NlccScheme::try_from(-1000),
            Err(PseudoError::InvalidNlccScheme(-1000))
        ));
        for code in -1..=5 {
            assert_eq!(NlccScheme::try_from(code).unwrap().code(), code);
        }

        let mut xc = Xc::default();
        assert!(xc.set_nlcc_scheme_code(6).is_err());
        xc.set_nlcc_scheme_code(2).unwrap();
        assert_eq!(xc.nlcc_scheme(), NlccScheme::Fhi);
    }

    #[test]
    fn test_density_requires_scheme() {
        let mut xc = Xc::new(1, 4);
        assert!(!xc.has_nlcc());
        let cd = density(&mesh(), 20.0, 10.0);
        assert!(matches!(
            xc.set_nlcc_density(&mesh(), &cd, None, None),
            Err(PseudoError::NlccDensityWithoutScheme)
        ));
        assert_eq!(xc.nlcc_density_eval(0.1), None);
    }

    #[test]
    fn test_density_evaluation() {
        let cd = density(&mesh(), 20.0, 10.0);
        let xc = xc_with_core(1, NlccScheme::Fhi, &cd);
        assert!(xc.has_nlcc());
        assert_eq!(xc.nlcc_density().unwrap().function(), cd.as_slice());

        assert_relative_eq!(xc.nlcc_density_eval(0.01).unwrap(), 1.6456049569, epsilon = 1e-10);
        assert_relative_eq!(
            xc.nlcc_density_eval_deriv(0.01).unwrap(),
            -0.15477352024,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            xc.nlcc_density_eval_deriv2(0.01).unwrap(),
            -5.8963771072e-3,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_compare() {
        let cd11 = density(&mesh(), 20.0, 10.0);
        let cd12 = density(&mesh(), 10.0, 2.0);
        let xc = xc_with_core(1, NlccScheme::Fhi, &cd11);

        assert_eq!(xc.compare(&xc_with_core(1, NlccScheme::Fhi, &cd11)), Comparison::Equal);
        assert_eq!(xc.compare(&xc_with_core(2, NlccScheme::Fhi, &cd11)), Comparison::Diff);
        assert_eq!(xc.compare(&xc_with_core(1, NlccScheme::Louie, &cd11)), Comparison::Diff);
        assert_eq!(xc.compare(&xc_with_core(1, NlccScheme::Fhi, &cd12)), Comparison::Diff);
    }

    #[test]
    fn test_dropping_the_scheme_drops_the_density() {
        let cd = density(&mesh(), 20.0, 10.0);
        let mut xc = xc_with_core(1, NlccScheme::Fhi, &cd);
        xc.set_nlcc_scheme(NlccScheme::None);
        assert!(xc.nlcc_density().is_none());
        assert_eq!(xc.compare(&Xc::new(1, 4).with_nlcc_prefactors(4.0, 1.0)), Comparison::Equal);
    }
}
