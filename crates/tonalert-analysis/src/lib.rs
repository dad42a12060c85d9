//! Tonalert Analysis - spectral peak monitoring for PCM audio
//!
//! This crate decides whether any frequency component of a waveform is too
//! loud. It is a pure function of a decoded [`Waveform`] and an
//! [`AnalysisConfig`]; it performs no file I/O and no rendering.
//!
//! - [`waveform`] - Decoded PCM input and channel selection
//! - [`config`] - Analysis modes, thresholds and frequency ranges
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrum`] - dB spectra, baseline centering, range selection, peak search
//! - [`threshold`] - Warning-level evaluation
//! - [`pipeline`] - The end-to-end [`Analyzer`]
//! - [`export`] - CSV export and the [`SpectrumSink`] seam for renderers
//!
//! ## Modes
//!
//! | mode | segment | window | levels |
//! |------|---------|--------|--------|
//! | [`AnalysisMode::FixedWindow`] | first `window_size` samples | Hann | dBFS |
//! | [`AnalysisMode::FullSignal`] | whole signal | none | dB above median bin |
//!
//! ## Example
//!
//! ```rust
//! use tonalert_analysis::{AnalysisConfig, Waveform, analyze};
//!
//! // 2000 Hz tone at 8 kHz, close to full scale
//! let samples: Vec<i32> = (0..1024)
//!     .map(|i| {
//!         let phase = 2.0 * std::f32::consts::PI * 2000.0 * i as f32 / 8000.0;
//!         (30000.0 * phase.sin()).round() as i32
//!     })
//!     .collect();
//! let waveform = Waveform::new(8000, samples, 32767).unwrap();
//!
//! let report = analyze(&waveform, &AnalysisConfig::fixed_window()).unwrap();
//! assert!(report.verdict.exceeded);
//! assert!((report.peak.frequency_hz - 2000.0).abs() <= 8.0);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod fft;
pub mod pipeline;
pub mod spectrum;
pub mod threshold;
pub mod waveform;

// Re-export main types
pub use config::{
    AnalysisConfig, AnalysisMode, DEFAULT_BASELINE_THRESHOLD, DEFAULT_DBFS_THRESHOLD,
    DEFAULT_WINDOW_SIZE, FrequencyRange, LevelScale,
};
pub use error::{AnalysisError, Result};
pub use export::{CsvSink, SpectrumSink, export_csv};
pub use fft::{Fft, Window};
pub use pipeline::{AnalysisReport, AnalysisSummary, Analyzer, analyze, prepare_segment};
pub use spectrum::{PeakResult, Spectrum, center_on_baseline, find_peak, magnitudes_dbfs};
pub use threshold::{ThresholdEvaluator, Verdict, exceeds};
pub use waveform::{Waveform, WaveformSource, pcm_full_scale};
