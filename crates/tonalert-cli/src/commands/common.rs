//! Shared CLI helpers used across multiple commands.

use clap::ValueEnum;
use tonalert_config::ProfileMode;

/// Analysis mode as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Hann-windowed first N samples, absolute dBFS
    Fixed,
    /// Whole signal, dB above the median bin
    Full,
}

impl From<ModeArg> for ProfileMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fixed => ProfileMode::FixedWindow,
            ModeArg::Full => ProfileMode::FullSignal,
        }
    }
}

/// Parse a `LOW:HIGH` frequency range for clap's `value_parser`.
pub fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let Some((low, high)) = s.split_once(':') else {
        return Err(format!("invalid range '{s}' (expected LOW:HIGH in Hz)"));
    };
    let low: f64 = low
        .trim()
        .parse()
        .map_err(|_| format!("invalid lower bound '{low}'"))?;
    let high: f64 = high
        .trim()
        .parse()
        .map_err(|_| format!("invalid upper bound '{high}'"))?;
    Ok((low, high))
}

/// Format a dB value, keeping `-inf` readable.
pub fn format_db(value: f32) -> String {
    if value == f32::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:.2}")
    }
}
