//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors produced by a single analysis call.
///
/// None of these are transient: every input is in memory, so retrying the
/// same call yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// The waveform is shorter than the configured analysis window.
    #[error("insufficient samples: window needs {required}, waveform has {available}")]
    InsufficientSamples {
        /// Samples required by the window.
        required: usize,
        /// Samples available in the selected channel.
        available: usize,
    },

    /// The transform input has zero length.
    #[error("cannot transform an empty segment")]
    EmptySegment,

    /// Range selection or peak search found no spectral bins.
    #[error("no spectral bins in the analysed range")]
    NoBinsInRange,

    /// The analysis configuration is malformed.
    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    /// The waveform value violates its invariants.
    #[error("invalid waveform: {0}")]
    InvalidWaveform(String),

    /// A spectrum was built from inconsistent frequency and magnitude data.
    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(String),
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
