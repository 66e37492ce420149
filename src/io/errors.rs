/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Error types for pseudopotential file I/O

use crate::mesh::MeshError;
use crate::meshfunc::MeshFunctionError;
use crate::pseudo::PseudoError;
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing pseudopotential files
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt data at line {line}: {message}")]
    DataCorrupt { line: usize, message: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Data cannot be written in this format: {0}")]
    UnsupportedData(String),

    #[error("Could not recognize the format of {0}")]
    UnknownFormat(PathBuf),

    #[error("Pseudopotential error: {0}")]
    Pseudo(#[from] PseudoError),

    #[error("Mesh function error: {0}")]
    MeshFunction(#[from] MeshFunctionError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Out of memory while reading data: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

impl FormatError {
    pub(crate) fn corrupt(line: usize, message: impl Into<String>) -> Self {
        FormatError::DataCorrupt {
            line,
            message: message.into(),
        }
    }

    /// Whether the error says the content did not match the expected layout
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            FormatError::DataCorrupt { .. }
                | FormatError::Pseudo(_)
                | FormatError::MeshFunction(_)
                | FormatError::Mesh(_)
        )
    }
}

/// Result type for file I/O operations
pub type Result<T> = std::result::Result<T, FormatError>;
