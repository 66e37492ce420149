/*
MIT License with libpspio Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: libpspio
Copyright (c) 2011 J. Alberdi, M. Oliveira, Y. Pouillon and M. Verstraete.
All rights reserved.
*/

//! FHI98PP pseudopotential files
//!
//! Layout, as written by FHI98PP:
//!
//! ```text
//! zvalence  n_potentials
//! <10 lines ignored>
//! np  amesh                      one block per l = 0..n_potentials-1
//! i  r  u(r)  v(r)               np lines, u(r) = r * wf(r)
//! ...
//! r  cd  cd'  cd''               optional core density, np lines
//! ```
//!
//! The core density is stored multiplied by 4π.

use super::config::FormatConfig;
use super::errors::{FormatError, Result};
use crate::mesh::{Mesh, MeshType};
use crate::pseudo::{NlccScheme, Potential, PspData, QuantumNumbers, State};
use crate::utils::constants::{FOUR_PI, NOT_DEFINED};
use log::{debug, warn};
use std::io::{BufRead, Lines, Write};
use std::str::FromStr;

/// Number of lines between the first line and the first block
const SKIPPED_HEADER_LINES: usize = 10;

/// Line iterator keeping track of line numbers for error messages
struct LineReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_number += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            FormatError::corrupt(self.line_number + 1, "unexpected end of file")
        })
    }

    /// Next line with content, or `None` at the end of the file
    fn next_non_blank(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn corrupt(&self, message: impl Into<String>) -> FormatError {
        FormatError::corrupt(self.line_number, message)
    }
}

/// First `count` whitespace separated fields of `line`
fn fields(line: &str, count: usize, line_number: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().take(count).collect();
    if fields.len() < count {
        return Err(FormatError::corrupt(
            line_number,
            format!("expected {} fields, found {}", count, fields.len()),
        ));
    }
    Ok(fields)
}

/// Parse a real number, accepting Fortran `D` exponents
fn parse_real(field: &str, line_number: usize) -> Result<f64> {
    let normalized = field.replace(['D', 'd'], "E");
    normalized
        .parse::<f64>()
        .map_err(|_| FormatError::corrupt(line_number, format!("invalid number '{}'", field)))
}

fn parse_integer<T: FromStr>(field: &str, line_number: usize) -> Result<T> {
    field
        .parse::<T>()
        .map_err(|_| FormatError::corrupt(line_number, format!("invalid integer '{}'", field)))
}

/// Empty vector with room for `len` items; sizes come from the file, so a
/// failed allocation is reported instead of aborting
fn reserve<T>(len: usize) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    Ok(values)
}

/// Format `value` like C's `%.{precision}E`: mantissa, `E`, sign and at
/// least two exponent digits
pub(crate) fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*E}", precision, value);
    let Some((mantissa, exponent)) = formatted.split_once('E') else {
        return formatted;
    };
    match exponent.parse::<i32>() {
        Ok(exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        Err(_) => formatted,
    }
}

/// Read an FHI98PP file
pub fn read<R: BufRead>(reader: R, config: &FormatConfig) -> Result<PspData> {
    let mut lines = LineReader::new(reader);

    let header = lines.expect_line()?;
    let header_fields = fields(&header, 2, lines.line_number)?;
    let zvalence = parse_real(header_fields[0], lines.line_number)?;
    let n_potentials: i32 = parse_integer(header_fields[1], lines.line_number)?;
    if n_potentials < 1 {
        return Err(lines.corrupt(format!(
            "number of potentials must be positive, found {}",
            n_potentials
        )));
    }
    for _ in 0..SKIPPED_HEADER_LINES {
        lines.expect_line()?;
    }

    let mut data = PspData::new();
    data.set_zvalence(zvalence);
    data.set_l_max(n_potentials - 1);

    let mut mesh: Option<Mesh> = None;
    let mut states = reserve(n_potentials as usize)?;
    for l in 0..n_potentials {
        let block_header = lines.expect_line()?;
        let np: usize = parse_integer(
            fields(&block_header, 2, lines.line_number)?[0],
            lines.line_number,
        )?;
        if i32::try_from(np).is_err() {
            return Err(lines.corrupt(format!("too many points: {}", np)));
        }

        let mut r = reserve(np)?;
        let mut wf = reserve(np)?;
        let mut v = reserve(np)?;
        for _ in 0..np {
            let line = lines.expect_line()?;
            let point = fields(&line, 4, lines.line_number)?;
            let _: i64 = parse_integer(point[0], lines.line_number)?;
            let radius = parse_real(point[1], lines.line_number)?;
            if radius <= 0.0 {
                return Err(lines.corrupt(format!("radius must be positive, found {}", radius)));
            }
            r.push(radius);
            wf.push(parse_real(point[2], lines.line_number)? / radius);
            v.push(parse_real(point[3], lines.line_number)?);
        }

        // All blocks share the mesh of the first one
        let block_mesh = match mesh.take() {
            Some(existing) if existing.np() != np => {
                return Err(lines.corrupt(format!(
                    "block for l = {} has {} points, expected {}",
                    l,
                    np,
                    existing.np()
                )));
            }
            Some(existing) => existing,
            None => {
                let detected = Mesh::from_points(&r, None)?;
                debug!(
                    "FHI mesh: {} points, type {}, a = {}, b = {}",
                    detected.np(),
                    detected.mesh_type(),
                    detected.a(),
                    detected.b()
                );
                detected
            }
        };

        let qn = QuantumNumbers::new(0, l, 0.0)?;
        let potential = config.mesh_function(&block_mesh, &v, None, None)?;
        data.set_potential(Potential::from_function(qn, potential))?;
        let wavefunction = config.mesh_function(&block_mesh, &wf, None, None)?;
        states.push(State::new(qn, 0.0, 0.0, 0.0, wavefunction, None));
        mesh = Some(block_mesh);
    }
    data.set_states(states);

    let Some(mesh) = mesh else {
        return Err(lines.corrupt("no potential blocks"));
    };

    if let Some(first) = lines.next_non_blank()? {
        let np = mesh.np();
        let mut cd = reserve(np)?;
        let mut cdp = reserve(np)?;
        let mut cdpp = reserve(np)?;
        let mut line = first;
        for ir in 0..np {
            if ir != 0 {
                line = lines.expect_line()?;
            }
            let values = fields(&line, 4, lines.line_number)?;
            cd.push(parse_real(values[1], lines.line_number)? / FOUR_PI);
            cdp.push(parse_real(values[2], lines.line_number)? / FOUR_PI);
            cdpp.push(parse_real(values[3], lines.line_number)? / FOUR_PI);
        }

        let density = config.mesh_function(&mesh, &cd, Some(&cdp), Some(&cdpp))?;
        let mut xc = data.xc().clone();
        xc.set_nlcc_scheme(NlccScheme::Fhi);
        xc.set_nlcc_density_function(density)?;
        data.set_xc(xc);
        debug!("FHI core density read on {} points", np);

        if lines.next_non_blank()?.is_some() {
            warn!(
                "Ignoring data after the core density at line {}",
                lines.line_number
            );
        }
    }

    data.set_mesh(mesh);
    data.set_symbol(NOT_DEFINED);
    Ok(data)
}

/// Write `data` as an FHI98PP file
///
/// Requires a log1 mesh and non-relativistic states.
pub fn write<W: Write>(data: &PspData, writer: &mut W) -> Result<()> {
    let mesh = data
        .mesh()
        .ok_or_else(|| FormatError::UnsupportedData("no mesh".to_string()))?;
    if mesh.mesh_type() != MeshType::Log1 {
        return Err(FormatError::UnsupportedData(format!(
            "FHI98PP requires a log1 mesh, found {}",
            mesh.mesh_type()
        )));
    }
    let radii = mesh.r();
    if radii.len() < 2 {
        return Err(FormatError::UnsupportedData(format!(
            "FHI98PP needs at least 2 mesh points, found {}",
            radii.len()
        )));
    }
    let n_potentials = data.l_max() + 1;

    writeln!(
        writer,
        "{:>20}   {}",
        format_scientific(data.zvalence(), 14),
        n_potentials
    )?;
    writeln!(writer, " 0.0000    0.0000    0.0000   0.0000")?;
    for _ in 0..SKIPPED_HEADER_LINES - 1 {
        writeln!(writer, "  0.0000    .00e+00   .00e+00")?;
    }

    for l in 0..n_potentials {
        let state = data
            .states_table()
            .lowest(l as usize)
            .and_then(|index| data.state(index))
            .ok_or_else(|| FormatError::UnsupportedData(format!("no state for l = {}", l)))?;
        if state.qn().j() != 0.0 {
            return Err(FormatError::UnsupportedData(
                "FHI98PP cannot store j-dependent states".to_string(),
            ));
        }
        let potential = data
            .potential(l, 0.0)
            .ok_or_else(|| FormatError::UnsupportedData(format!("no potential for l = {}", l)))?;

        writeln!(
            writer,
            "{:<4} {:>20}",
            mesh.np(),
            format_scientific(radii[1] / radii[0], 14)
        )?;
        for (ir, &r) in radii.iter().enumerate() {
            writeln!(
                writer,
                "{:>4} {:>20} {:>20} {:>20}",
                ir + 1,
                format_scientific(r, 14),
                format_scientific(state.wf_eval(r) * r, 14),
                format_scientific(potential.eval(r), 14)
            )?;
        }
    }

    if data.xc().has_nlcc() {
        match data.xc().nlcc_density() {
            Some(density) => {
                for &r in radii {
                    writeln!(
                        writer,
                        " {:>18} {:>18} {:>18} {:>18}",
                        format_scientific(r, 12),
                        format_scientific(density.eval(r) * FOUR_PI, 12),
                        format_scientific(density.eval_deriv(r) * FOUR_PI, 12),
                        format_scientific(density.eval_deriv2(r) * FOUR_PI, 12)
                    )?;
                }
            }
            None => warn!("Core correction scheme set without a density, none written"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::io::Cursor;

    /// Two-channel file on a 12-point log1 mesh, optionally with a core density
    fn sample_file(with_nlcc: bool) -> String {
        let mut text = String::from("4.00000000000000E+00   2\n");
        for _ in 0..SKIPPED_HEADER_LINES {
            text.push_str("  0.0000    .00e+00   .00e+00\n");
        }
        let radii: Vec<f64> = (0..12).map(|i| 0.01 * 1.5f64.powi(i)).collect();
        for l in 0..2 {
            text.push_str(&format!("12   {}\n", format_scientific(1.5, 14)));
            for (i, r) in radii.iter().enumerate() {
                let u = r.powi(l + 1) * (-r).exp();
                let v = -4.0 / (r + 0.5) - l as f64;
                text.push_str(&format!(
                    "{:>4} {} {} {}\n",
                    i + 1,
                    format_scientific(*r, 14),
                    format_scientific(u, 14),
                    format_scientific(v, 14)
                ));
            }
        }
        if with_nlcc {
            for r in &radii {
                let cd = (-r * r).exp();
                text.push_str(&format!(
                    " {} {} {} {}\n",
                    format_scientific(*r, 12),
                    format_scientific(cd, 12),
                    format_scientific(-2.0 * r * cd, 12),
                    format_scientific((4.0 * r * r - 2.0) * cd, 12)
                ));
            }
        }
        text
    }

    #[rstest]
    #[case(1.0, 14, "1.00000000000000E+00")]
    #[case(-0.0123, 14, "-1.23000000000000E-02")]
    #[case(6.02214076e23, 3, "6.022E+23")]
    #[case(0.0, 12, "0.000000000000E+00")]
    #[case(1.0e-123, 2, "1.00E-123")]
    fn test_format_scientific(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(format_scientific(value, precision), expected);
    }

    #[test]
    fn test_parse_fortran_exponent() {
        assert_relative_eq!(parse_real("1.5D+02", 1).unwrap(), 150.0);
        assert_relative_eq!(parse_real("-2.0d-1", 1).unwrap(), -0.2);
        assert!(parse_real("abc", 7).is_err());
    }

    #[test]
    fn test_read_sample() {
        let data = read(Cursor::new(sample_file(false)), &FormatConfig::default()).unwrap();
        assert_eq!(data.zvalence(), 4.0);
        assert_eq!(data.l_max(), 1);
        assert_eq!(data.symbol(), NOT_DEFINED);
        assert_eq!(data.n_potentials(), 2);
        assert_eq!(data.states().len(), 2);
        assert!(!data.xc().has_nlcc());

        let mesh = data.mesh().unwrap();
        assert_eq!(mesh.mesh_type(), MeshType::Log1);
        assert_eq!(mesh.np(), 12);

        let r = mesh.r()[3];
        assert_relative_eq!(data.states()[0].wf_eval(r), (-r).exp(), max_relative = 1e-13);
        assert_relative_eq!(
            data.potential_eval(1, 0.0, r).unwrap(),
            -4.0 / (r + 0.5) - 1.0,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_read_core_density() {
        let data = read(Cursor::new(sample_file(true)), &FormatConfig::default()).unwrap();
        assert_eq!(data.xc().nlcc_scheme(), NlccScheme::Fhi);
        let r = data.mesh().unwrap().r()[5];
        let expected = (-r * r).exp() / FOUR_PI;
        assert_relative_eq!(data.xc().nlcc_density_eval(r).unwrap(), expected, max_relative = 1e-11);
    }

    #[test]
    fn test_truncated_file() {
        let text = sample_file(false);
        let truncated: String = text.lines().take(20).map(|line| format!("{}\n", line)).collect();
        let err = read(Cursor::new(truncated), &FormatConfig::default()).unwrap_err();
        assert!(matches!(err, FormatError::DataCorrupt { line: 21, .. }));
    }

    #[test]
    fn test_bad_header() {
        let err = read(Cursor::new("4.0\n"), &FormatConfig::default()).unwrap_err();
        assert!(matches!(err, FormatError::DataCorrupt { line: 1, .. }));
    }

    #[test]
    fn test_write_then_read() {
        let config = FormatConfig::default();
        let data = read(Cursor::new(sample_file(true)), &config).unwrap();

        let mut buffer = Vec::new();
        write(&data, &mut buffer).unwrap();
        let reread = read(Cursor::new(buffer), &config).unwrap();
        assert!(data.compare(&reread).is_equal());
    }

    #[test]
    fn test_write_requires_log1() {
        let mut data = read(Cursor::new(sample_file(false)), &FormatConfig::default()).unwrap();
        data.set_mesh(Mesh::from_parameters(MeshType::Linear, 0.1, 0.0, 12).unwrap());
        let mut buffer = Vec::new();
        assert!(matches!(
            write(&data, &mut buffer),
            Err(FormatError::UnsupportedData(_))
        ));
    }
}
