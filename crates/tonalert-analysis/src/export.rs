//! Export formats for analysis results.
//!
//! Rendering is not done here. A [`SpectrumSink`] receives the finished
//! [`AnalysisReport`] and can plot it, store it, or forward it elsewhere.
//! [`CsvSink`] writes the data a plot would need as CSV.

use std::io::Write;
use std::path::Path;

use crate::pipeline::AnalysisReport;

/// Consumer of finished analysis reports.
pub trait SpectrumSink {
    /// Sink error type.
    type Error;

    /// Receive one report.
    fn consume(&mut self, report: &AnalysisReport) -> Result<(), Self::Error>;
}

/// Writes reports as CSV to any [`Write`] target.
///
/// Layout:
///
/// ```text
/// frequency_hz,magnitude_db,in_range
/// 0.00,-inf,false
/// ...
/// # peak_frequency_hz,2000.00
/// # peak_db,-12.03
/// # warning_threshold_db,-12.00
/// # baseline_offset_db,64.21
/// ```
///
/// `in_range` is true for every bin when no frequency range is configured.
/// The `baseline_offset_db` line is only present in full-signal mode.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SpectrumSink for CsvSink<W> {
    type Error = std::io::Error;

    fn consume(&mut self, report: &AnalysisReport) -> std::io::Result<()> {
        writeln!(self.writer, "frequency_hz,magnitude_db,in_range")?;
        let range = report.restricted.as_ref().and_then(|r| {
            Some((*r.frequencies().first()?, *r.frequencies().last()?))
        });
        for (freq, db) in report.spectrum.iter() {
            let in_range = match (&report.restricted, range) {
                (None, _) => true,
                (Some(_), Some((lo, hi))) => freq >= lo && freq <= hi,
                (Some(_), None) => false,
            };
            writeln!(self.writer, "{:.2},{:.2},{}", freq, db, in_range)?;
        }
        writeln!(self.writer, "# peak_frequency_hz,{:.2}", report.peak.frequency_hz)?;
        writeln!(self.writer, "# peak_db,{:.2}", report.peak.amplitude_db)?;
        writeln!(
            self.writer,
            "# warning_threshold_db,{:.2}",
            report.warning_threshold_db
        )?;
        if let Some(offset) = report.baseline_offset_db {
            writeln!(self.writer, "# baseline_offset_db,{:.2}", offset)?;
        }
        self.writer.flush()
    }
}

/// Write a report as CSV to a file.
///
/// # Example
///
/// ```rust,ignore
/// use tonalert_analysis::{analyze, export::export_csv};
///
/// let report = analyze(&waveform, &config)?;
/// export_csv(&report, "spectrum.csv")?;
/// ```
pub fn export_csv(report: &AnalysisReport, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    CsvSink::new(std::io::BufWriter::new(file)).consume(report)
}
