/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Pseudopotential file formats
//!
//! Reading goes through [`PspData::read`], which either uses the format it
//! is given or tries every known format in turn and records the one that
//! worked. Writing goes through [`PspData::write`].

pub mod config;
pub mod errors;
pub mod fhi;

pub use config::FormatConfig;
pub use errors::{FormatError, Result};

use crate::pseudo::PspData;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Supported pseudopotential file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Files written by FHI98PP
    Fhi98pp,
}

impl Format {
    /// Formats tried, in order, when none is given
    pub const ALL: [Format; 1] = [Format::Fhi98pp];

    /// Read pseudopotential data in this format
    pub fn read_from<R: BufRead>(self, reader: R, config: &FormatConfig) -> Result<PspData> {
        match self {
            Format::Fhi98pp => fhi::read(reader, config),
        }
    }

    /// Write pseudopotential data in this format
    pub fn write_to<W: Write>(self, data: &PspData, writer: &mut W) -> Result<()> {
        match self {
            Format::Fhi98pp => fhi::write(data, writer),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Fhi98pp => write!(f, "fhi98pp"),
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fhi" | "fhi98pp" => Ok(Format::Fhi98pp),
            _ => Err(FormatError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl PspData {
    /// Read a pseudopotential file
    ///
    /// Without a format every known format is tried and the first one that
    /// reads the file is kept, see [`PspData::format_guessed`]. Only I/O
    /// errors stop the search early.
    pub fn read<P: AsRef<Path>>(
        path: P,
        format: Option<Format>,
        config: &FormatConfig,
    ) -> Result<PspData> {
        let path = path.as_ref();

        if let Some(format) = format {
            let reader = BufReader::new(File::open(path)?);
            let data = format.read_from(reader, config)?;
            info!("Read {} as {}", path.display(), format);
            return Ok(data);
        }

        for format in Format::ALL {
            let reader = BufReader::new(File::open(path)?);
            match format.read_from(reader, config) {
                Ok(mut data) => {
                    info!("Read {} as {} (guessed)", path.display(), format);
                    data.set_format_guessed(Some(format));
                    return Ok(data);
                }
                Err(err) if err.is_data_error() => {
                    debug!("{} is not {}: {}", path.display(), format, err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(FormatError::UnknownFormat(path.to_path_buf()))
    }

    /// Write a pseudopotential file
    pub fn write<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        format.write_to(self, &mut writer)?;
        writer.flush()?;
        info!("Wrote {} as {}", path.display(), format);
        Ok(())
    }
}
