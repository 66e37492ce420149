/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

use crate::io::{Format, FormatConfig};
use crate::pseudo::{PspData, PspDataComparison};
use anyhow::{anyhow, Context};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(clap::Args, Debug)]
pub struct LoopArgs {
    /// File to read
    source: PathBuf,

    /// Where to write the copy
    destination: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct DiffArgs {
    /// Reference file
    reference: PathBuf,

    /// File checked against the reference
    check: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RoundtripArgs {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Serialize, Debug)]
struct LoopReport<'a> {
    source: &'a Path,
    destination: &'a Path,
    format: Format,
    comparison: PspDataComparison,
}

#[derive(Serialize, Debug)]
struct DiffReport<'a> {
    reference: &'a Path,
    check: &'a Path,
    format: Option<Format>,
    comparison: PspDataComparison,
}

#[derive(Serialize, Debug)]
struct RoundtripReport<'a> {
    file: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<PspDataComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

/// Format to write `data` in: the requested one, else the one it was read with
fn output_format(requested: Option<Format>, data: &PspData) -> anyhow::Result<Format> {
    requested
        .or(data.format_guessed())
        .ok_or_else(|| anyhow!("cannot tell which format to write"))
}

pub(super) fn run_loop(
    args: &LoopArgs,
    format: Option<Format>,
    config: &FormatConfig,
) -> anyhow::Result<bool> {
    let data = PspData::read(&args.source, format, config)
        .with_context(|| format!("reading {}", args.source.display()))?;
    let format = output_format(format, &data)?;

    data.write(&args.destination, format)
        .with_context(|| format!("writing {}", args.destination.display()))?;
    let copy = PspData::read(&args.destination, Some(format), config)
        .with_context(|| format!("reading back {}", args.destination.display()))?;

    let comparison = data.compare(&copy);
    print_report(&LoopReport {
        source: &args.source,
        destination: &args.destination,
        format,
        comparison,
    })?;
    Ok(comparison.is_equal())
}

pub(super) fn run_diff(
    args: &DiffArgs,
    format: Option<Format>,
    config: &FormatConfig,
) -> anyhow::Result<bool> {
    let reference = PspData::read(&args.reference, format, config)
        .with_context(|| format!("reading {}", args.reference.display()))?;
    let check = PspData::read(&args.check, format, config)
        .with_context(|| format!("reading {}", args.check.display()))?;

    if format.is_none() && reference.format_guessed() != check.format_guessed() {
        warn!(
            "Files were read as different formats: {:?} and {:?}",
            reference.format_guessed(),
            check.format_guessed()
        );
        return Ok(false);
    }

    let comparison = reference.compare(&check);
    print_report(&DiffReport {
        reference: &args.reference,
        check: &args.check,
        format: format.or(reference.format_guessed()),
        comparison,
    })?;
    Ok(comparison.is_equal())
}

/// Read, write to memory and read back a single file
fn roundtrip_file(
    path: &Path,
    format: Option<Format>,
    config: &FormatConfig,
) -> anyhow::Result<(Format, PspDataComparison)> {
    let data = PspData::read(path, format, config)?;
    let format = output_format(format, &data)?;

    let mut buffer = Vec::new();
    format.write_to(&data, &mut buffer)?;
    let copy = format.read_from(Cursor::new(buffer), config)?;
    Ok((format, data.compare(&copy)))
}

pub(super) fn run_roundtrip(
    args: &RoundtripArgs,
    format: Option<Format>,
    config: &FormatConfig,
) -> anyhow::Result<bool> {
    let reports: Vec<RoundtripReport> = args
        .files
        .par_iter()
        .map(|file| match roundtrip_file(file, format, config) {
            Ok((format, comparison)) => RoundtripReport {
                file,
                format: Some(format),
                comparison: Some(comparison),
                error: None,
            },
            Err(err) => RoundtripReport {
                file,
                format: None,
                comparison: None,
                error: Some(format!("{:#}", err)),
            },
        })
        .collect();

    let mut passed = 0;
    for report in &reports {
        print_report(report)?;
        if report.comparison.is_some_and(|c| c.is_equal()) {
            passed += 1;
        }
    }
    info!("{} of {} files survived the round trip", passed, reports.len());
    Ok(passed == reports.len())
}
