//! Audio file I/O for the tonalert analysis engine.
//!
//! This crate provides:
//!
//! - **WAV decoding**: [`read_waveform`] and [`WavSource`] turn integer PCM
//!   WAV files into [`Waveform`](tonalert_analysis::Waveform) values
//!   (channel 0 only, full scale taken from the bit depth)
//! - **Metadata**: [`read_wav_info`] reads the header without loading samples
//! - **WAV encoding**: [`write_wav`] for generated test signals
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonalert_analysis::{AnalysisConfig, analyze};
//! use tonalert_io::read_waveform;
//!
//! let waveform = read_waveform("input.wav")?;
//! let report = analyze(&waveform, &AnalysisConfig::fixed_window())?;
//! println!("{}", report.verdict.message);
//! ```

mod wav;

pub use wav::{WavFormat, WavInfo, WavSource, WavSpec, read_wav_info, read_waveform, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's sample encoding cannot be analysed.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The decoded audio does not form a valid waveform.
    #[error("Invalid audio data: {0}")]
    Analysis(#[from] tonalert_analysis::AnalysisError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
