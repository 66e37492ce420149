/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! Command line interface
//!
//! Diagnostic commands to check that files survive a read/write cycle and
//! to compare two files structurally. Reports are printed as JSON, one
//! line per file or file pair.

mod commands;

use crate::interpolation::InterpolationMethod;
use crate::io::{Format, FormatConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pspio-rs", version, about = "Pseudopotential file interchange checks")]
pub struct Cli {
    /// Spline backend used when reading files
    #[arg(long, global = true, default_value = "pentadiagonal")]
    pub interp: InterpolationMethod,

    /// File format; guessed from the content when omitted
    #[arg(long, global = true)]
    pub format: Option<Format>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum CliCommand {
    /// Read a file, write a copy in the same format and read the copy back
    Loop(commands::LoopArgs),
    /// Compare two files part by part
    Diff(commands::DiffArgs),
    /// Check many files in memory, in parallel
    Roundtrip(commands::RoundtripArgs),
}

impl Cli {
    /// Log level filter for the requested verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn format_config(&self) -> FormatConfig {
        FormatConfig::default().with_interp_method(self.interp)
    }
}

/// Run the parsed command; returns whether every check passed
pub fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = cli.format_config();
    match &cli.command {
        CliCommand::Loop(args) => commands::run_loop(args, cli.format, &config),
        CliCommand::Diff(args) => commands::run_diff(args, cli.format, &config),
        CliCommand::Roundtrip(args) => commands::run_roundtrip(args, cli.format, &config),
    }
}
