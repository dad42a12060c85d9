//! The analysis pipeline.
//!
//! ```text
//! Waveform → segment (window) → FFT → dB spectrum → [baseline] → [range] → peak → verdict
//! ```
//!
//! Each call is independent and holds no shared mutable state, so an
//! [`Analyzer`] can be shared by reference across threads.

use serde::Serialize;
use std::sync::OnceLock;

use crate::config::{AnalysisConfig, AnalysisMode, LevelScale};
use crate::error::{AnalysisError, Result};
use crate::fft::{Fft, Window};
use crate::spectrum::{PeakResult, Spectrum, center_on_baseline, find_peak};
use crate::threshold::{ThresholdEvaluator, Verdict};
use crate::waveform::Waveform;

/// Everything one analysis call produced.
///
/// This is the data a renderer needs: the full spectrum, the range-restricted
/// spectrum, the baseline offset, the peak and the warning level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Full one-sided spectrum (baseline-centered in full-signal mode).
    pub spectrum: Spectrum,
    /// The spectrum restricted to the configured frequency range, if any.
    pub restricted: Option<Spectrum>,
    /// Offset added to center the median at 0 dB (full-signal mode only).
    pub baseline_offset_db: Option<f32>,
    /// Loudest bin of the searched spectrum.
    pub peak: PeakResult,
    /// Warning level the peak was compared against.
    pub warning_threshold_db: f32,
    /// Scale of all magnitudes in this report.
    pub scale: LevelScale,
    /// Threshold outcome.
    pub verdict: Verdict,
}

impl AnalysisReport {
    /// The spectrum the peak was searched in.
    pub fn searched(&self) -> &Spectrum {
        self.restricted.as_ref().unwrap_or(&self.spectrum)
    }

    /// Compact peak/warning record.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            peak_value: self.peak.amplitude_db,
            peak_frequency: self.peak.frequency_hz,
            warning: self.verdict.exceeded,
        }
    }
}

/// Peak value, peak frequency and warning flag of a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Peak magnitude in dB.
    pub peak_value: f32,
    /// Peak frequency in Hz.
    pub peak_frequency: f64,
    /// True when the warning level was exceeded.
    pub warning: bool,
}

/// Runs the pipeline for a fixed [`AnalysisConfig`].
///
/// In fixed-window mode the FFT plan is built on the first waveform long
/// enough to fill the window, then reused across calls.
///
/// # Example
///
/// ```rust
/// use tonalert_analysis::{AnalysisConfig, Analyzer, Waveform};
///
/// let waveform = Waveform::new(8000, vec![0; 1024], 32767).unwrap();
/// let analyzer = Analyzer::new(AnalysisConfig::fixed_window());
/// let report = analyzer.analyze(&waveform).unwrap();
/// assert!(!report.verdict.exceeded);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    fixed_fft: OnceLock<Fft>,
}

impl Analyzer {
    /// Create an analyzer.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            fixed_fft: OnceLock::new(),
        }
    }

    /// The fixed-window plan, built on first use.
    fn fixed_fft(&self, window_size: usize) -> Result<&Fft> {
        if let Some(fft) = self.fixed_fft.get() {
            return Ok(fft);
        }
        let fft = Fft::new(window_size)?;
        Ok(self.fixed_fft.get_or_init(|| fft))
    }

    /// The analyzer's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one waveform.
    pub fn analyze(&self, waveform: &Waveform) -> Result<AnalysisReport> {
        // Fails before any planning when the waveform cannot fill the window
        let segment = prepare_segment(waveform.samples(), self.config.mode())?;

        let spectrum = match self.config.mode() {
            AnalysisMode::FixedWindow { window_size } => Spectrum::from_fft(
                self.fixed_fft(window_size)?,
                &segment,
                waveform.sample_rate(),
                waveform.bit_depth_max(),
            )?,
            AnalysisMode::FullSignal => {
                Spectrum::from_segment(&segment, waveform.sample_rate(), waveform.bit_depth_max())?
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            transform_len = segment.len(),
            bins = spectrum.len(),
            "computed spectrum"
        );

        let (spectrum, baseline_offset_db) = match self.config.mode() {
            AnalysisMode::FullSignal => {
                let (centered, offset) = center_on_baseline(&spectrum);
                #[cfg(feature = "tracing")]
                tracing::debug!(offset_db = offset, "centered spectrum on median baseline");
                (centered, Some(offset))
            }
            AnalysisMode::FixedWindow { .. } => (spectrum, None),
        };

        let restricted = self.config.frequency_range().map(|range| {
            let restricted = spectrum.restrict(range);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                low_hz = range.low_hz(),
                high_hz = range.high_hz(),
                bins = restricted.len(),
                "restricted spectrum"
            );
            restricted
        });

        let peak = find_peak(restricted.as_ref().unwrap_or(&spectrum))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            frequency_hz = peak.frequency_hz,
            amplitude_db = peak.amplitude_db,
            "found peak"
        );

        let verdict = ThresholdEvaluator::new(self.config.warning_threshold_db(), self.config.scale())
            .with_range(self.config.frequency_range())
            .evaluate(&peak);

        Ok(AnalysisReport {
            spectrum,
            restricted,
            baseline_offset_db,
            peak,
            warning_threshold_db: self.config.warning_threshold_db(),
            scale: self.config.scale(),
            verdict,
        })
    }
}

/// Analyze a waveform with a one-off [`Analyzer`].
pub fn analyze(waveform: &Waveform, config: &AnalysisConfig) -> Result<AnalysisReport> {
    Analyzer::new(*config).analyze(waveform)
}

/// Select and window the samples that will be transformed.
///
/// Fixed-window mode takes the first `window_size` samples and applies a
/// symmetric Hann window. Full-signal mode uses every sample as is.
pub fn prepare_segment(samples: &[i32], mode: AnalysisMode) -> Result<Vec<f32>> {
    match mode {
        AnalysisMode::FixedWindow { window_size } => {
            if samples.len() < window_size {
                return Err(AnalysisError::InsufficientSamples {
                    required: window_size,
                    available: samples.len(),
                });
            }
            let mut segment: Vec<f32> = samples[..window_size].iter().map(|&s| s as f32).collect();
            Window::Hann.apply(&mut segment);
            Ok(segment)
        }
        AnalysisMode::FullSignal => {
            if samples.is_empty() {
                return Err(AnalysisError::EmptySegment);
            }
            Ok(samples.iter().map(|&s| s as f32).collect())
        }
    }
}
