//! Whitespace-delimited text table of a trajectory
//!
//! One header line labelling the columns, then one `time x y` row per sample.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::simulation::states::Trajectory;

pub const HEADER: &str = "Time(s) x(m) y(m)";

/// How each number in a row is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// 18 fractional digits, signed two-digit exponent: `7.000000000000000000e+06`
    Scientific,
    /// Shortest decimal that reads back to the same value: `7000000.0`
    Plain,
}

impl NumberFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            NumberFormat::Scientific => scientific(value),
            NumberFormat::Plain => format!("{value:?}"),
        }
    }
}

pub fn write_table<W: Write>(mut writer: W, trajectory: &Trajectory, format: NumberFormat) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for s in trajectory {
        writeln!(
            writer,
            "{} {} {}",
            format.format(s.time),
            format.format(s.x),
            format.format(s.y)
        )?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the table into it
pub fn save_table(path: &Path, trajectory: &Trajectory, format: NumberFormat) -> io::Result<()> {
    let file = File::create(path)?;
    write_table(BufWriter::new(file), trajectory, format)
}

fn scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let s = format!("{value:.18e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}
