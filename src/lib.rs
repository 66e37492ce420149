/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! # pspio-rs
//!
//! Reading, writing and comparing atomic pseudopotential files.
//!
//! Every format is normalized into one in-memory representation,
//! [`PspData`](pseudo::PspData), built on radial meshes and mesh functions:
//! tabulated functions with their first and second derivatives, evaluated
//! anywhere through natural cubic splines.
//!
//! ```no_run
//! use pspio_rs::io::{Format, FormatConfig};
//! use pspio_rs::pseudo::PspData;
//!
//! let data = PspData::read("Si.fhi", None, &FormatConfig::default())?;
//! println!("l_max = {}, v_s(1.0) = {:?}", data.l_max(), data.potential_eval(0, 0.0, 1.0));
//! data.write("Si-copy.fhi", Format::Fhi98pp)?;
//! # Ok::<(), pspio_rs::io::FormatError>(())
//! ```

pub mod cli;
pub mod interpolation;
pub mod io;
pub mod mesh;
pub mod meshfunc;
pub mod pseudo;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
