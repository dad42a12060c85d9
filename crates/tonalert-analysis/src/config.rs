//! Analysis configuration.
//!
//! An [`AnalysisConfig`] is validated when it is built, so the pipeline never
//! sees a non-positive window or an inverted frequency range.

use std::fmt;

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Default FFT window length for [`AnalysisMode::FixedWindow`].
pub const DEFAULT_WINDOW_SIZE: usize = 1024;

/// Default warning level for absolute (dBFS) analysis.
pub const DEFAULT_DBFS_THRESHOLD: f32 = -12.0;

/// Default warning level for baseline-relative analysis, in dB above the median.
pub const DEFAULT_BASELINE_THRESHOLD: f32 = 30.0;

/// Which part of the waveform is transformed and how it is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Hann-windowed snapshot of the first `window_size` samples, levels in dBFS.
    FixedWindow {
        /// Number of samples transformed.
        window_size: usize,
    },
    /// The whole signal, unwindowed, levels relative to the median bin.
    FullSignal,
}

impl AnalysisMode {
    /// The level scale this mode reports in.
    pub fn scale(&self) -> LevelScale {
        match self {
            AnalysisMode::FixedWindow { .. } => LevelScale::Dbfs,
            AnalysisMode::FullSignal => LevelScale::AboveBaseline,
        }
    }

    /// Mode-specific default warning level.
    pub fn default_threshold_db(&self) -> f32 {
        match self {
            AnalysisMode::FixedWindow { .. } => DEFAULT_DBFS_THRESHOLD,
            AnalysisMode::FullSignal => DEFAULT_BASELINE_THRESHOLD,
        }
    }
}

/// Reference level of spectrum magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelScale {
    /// Decibels relative to the sample format's full scale.
    Dbfs,
    /// Decibels relative to the spectrum median.
    AboveBaseline,
}

impl fmt::Display for LevelScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelScale::Dbfs => f.write_str("dBFS"),
            LevelScale::AboveBaseline => f.write_str("dB"),
        }
    }
}

/// Inclusive frequency interval in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRange {
    low_hz: f64,
    high_hz: f64,
}

impl FrequencyRange {
    /// Create a range. Both bounds must be finite and `low_hz < high_hz`.
    pub fn new(low_hz: f64, high_hz: f64) -> Result<Self> {
        if !low_hz.is_finite() || !high_hz.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "frequency range bounds must be finite, got {low_hz}..{high_hz}"
            )));
        }
        if low_hz >= high_hz {
            return Err(AnalysisError::InvalidConfig(format!(
                "frequency range low ({low_hz} Hz) must be below high ({high_hz} Hz)"
            )));
        }
        Ok(Self { low_hz, high_hz })
    }

    /// Lower bound in Hz.
    pub fn low_hz(&self) -> f64 {
        self.low_hz
    }

    /// Upper bound in Hz.
    pub fn high_hz(&self) -> f64 {
        self.high_hz
    }

    /// True if `freq_hz` lies within the closed interval.
    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz >= self.low_hz && freq_hz <= self.high_hz
    }
}

/// Validated analysis parameters.
///
/// # Example
///
/// ```rust
/// use tonalert_analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::full_signal()
///     .with_frequency_range(1000.0, 4000.0)
///     .unwrap();
/// assert_eq!(config.warning_threshold_db(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisConfig {
    mode: AnalysisMode,
    warning_threshold_db: f32,
    frequency_range: Option<FrequencyRange>,
}

impl AnalysisConfig {
    /// Build and validate a config.
    pub fn new(
        mode: AnalysisMode,
        warning_threshold_db: f32,
        frequency_range: Option<FrequencyRange>,
    ) -> Result<Self> {
        if let AnalysisMode::FixedWindow { window_size: 0 } = mode {
            return Err(AnalysisError::InvalidConfig(
                "window_size must be positive".to_string(),
            ));
        }
        if !warning_threshold_db.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "warning threshold must be finite, got {warning_threshold_db}"
            )));
        }
        Ok(Self {
            mode,
            warning_threshold_db,
            frequency_range,
        })
    }

    /// Absolute dBFS analysis of a 1024-sample Hann window, warning above -12 dBFS.
    pub fn fixed_window() -> Self {
        Self {
            mode: AnalysisMode::FixedWindow {
                window_size: DEFAULT_WINDOW_SIZE,
            },
            warning_threshold_db: DEFAULT_DBFS_THRESHOLD,
            frequency_range: None,
        }
    }

    /// Baseline-relative analysis of the whole signal, warning 30 dB above the median.
    pub fn full_signal() -> Self {
        Self {
            mode: AnalysisMode::FullSignal,
            warning_threshold_db: DEFAULT_BASELINE_THRESHOLD,
            frequency_range: None,
        }
    }

    /// Set the window size, switching to [`AnalysisMode::FixedWindow`].
    pub fn with_window_size(self, window_size: usize) -> Result<Self> {
        Self::new(
            AnalysisMode::FixedWindow { window_size },
            self.warning_threshold_db,
            self.frequency_range,
        )
    }

    /// Set the warning level.
    pub fn with_warning_threshold(self, warning_threshold_db: f32) -> Result<Self> {
        Self::new(self.mode, warning_threshold_db, self.frequency_range)
    }

    /// Restrict peak search to `[low_hz, high_hz]`.
    pub fn with_frequency_range(self, low_hz: f64, high_hz: f64) -> Result<Self> {
        let range = FrequencyRange::new(low_hz, high_hz)?;
        Self::new(self.mode, self.warning_threshold_db, Some(range))
    }

    /// Analysis mode.
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Warning level in the mode's [`LevelScale`].
    pub fn warning_threshold_db(&self) -> f32 {
        self.warning_threshold_db
    }

    /// Optional peak-search range.
    pub fn frequency_range(&self) -> Option<FrequencyRange> {
        self.frequency_range
    }

    /// Level scale of the spectrum this config produces.
    pub fn scale(&self) -> LevelScale {
        self.mode.scale()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::fixed_window()
    }
}
