/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Pseudopotential data objects
//!
//! Quantum numbers, states, potentials, projectors, exchange-correlation
//! data and the [`PspData`] aggregate that file formats read and write.
//! Every object owns its mesh functions, and through them its own copy of
//! the mesh.

pub mod errors;
pub mod potential;
pub mod projector;
pub mod pspdata;
pub mod qn;
pub mod state;
pub mod xc;

pub use errors::{PseudoError, Result};
pub use potential::Potential;
pub use projector::Projector;
pub use pspdata::{PspData, PspDataComparison, PspInfo, WaveEquation};
pub use qn::{lj_to_index, QuantumNumbers};
pub use state::{State, StatesTable};
pub use xc::{NlccScheme, Xc};
