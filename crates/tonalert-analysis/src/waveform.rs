//! Decoded PCM input and channel selection.

use crate::error::{AnalysisError, Result};

/// A single channel of integer PCM audio.
///
/// `bit_depth_max` is the largest magnitude the source sample type can
/// represent (32767 for 16-bit signed). It is the 0 dBFS reference used by
/// the magnitude normalizer, so decoders must supply it explicitly rather
/// than letting the engine guess it from the sample values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    sample_rate: u32,
    samples: Vec<i32>,
    bit_depth_max: u32,
}

impl Waveform {
    /// Create a mono waveform.
    ///
    /// Fails with [`AnalysisError::InvalidWaveform`] if the sample rate or
    /// full-scale value is zero, and [`AnalysisError::EmptySegment`] if there
    /// are no samples.
    pub fn new(sample_rate: u32, samples: Vec<i32>, bit_depth_max: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidWaveform(
                "sample rate must be positive".to_string(),
            ));
        }
        if bit_depth_max == 0 {
            return Err(AnalysisError::InvalidWaveform(
                "bit_depth_max must be positive".to_string(),
            ));
        }
        if samples.is_empty() {
            return Err(AnalysisError::EmptySegment);
        }
        Ok(Self {
            sample_rate,
            samples,
            bit_depth_max,
        })
    }

    /// Create a waveform from interleaved multi-channel samples.
    ///
    /// Only channel 0 is kept; the other channels are dropped, never mixed in.
    pub fn from_interleaved(
        sample_rate: u32,
        interleaved: &[i32],
        channels: usize,
        bit_depth_max: u32,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(AnalysisError::InvalidWaveform(
                "channel count must be positive".to_string(),
            ));
        }
        let samples = interleaved.iter().step_by(channels).copied().collect();
        Self::new(sample_rate, samples, bit_depth_max)
    }

    /// Create a waveform from planar (one buffer per channel) samples.
    ///
    /// Only the first channel buffer is kept.
    pub fn from_planar(sample_rate: u32, planes: &[Vec<i32>], bit_depth_max: u32) -> Result<Self> {
        let first = planes.first().ok_or_else(|| {
            AnalysisError::InvalidWaveform("channel count must be positive".to_string())
        })?;
        Self::new(sample_rate, first.clone(), bit_depth_max)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples of the selected channel.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Full-scale magnitude of the source sample type.
    pub fn bit_depth_max(&self) -> u32 {
        self.bit_depth_max
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A decoder that yields waveforms.
///
/// The engine never parses file formats itself; implementors decode their
/// container, pick channel 0 and report the sample type's full scale.
pub trait WaveformSource {
    /// Decoder error type.
    type Error: From<AnalysisError>;

    /// Decode the next waveform from the source.
    fn read_waveform(&mut self) -> std::result::Result<Waveform, Self::Error>;
}

/// Full-scale value of a signed integer PCM format with the given bit depth.
///
/// `pcm_full_scale(16)` is 32767, `pcm_full_scale(24)` is 8388607.
pub fn pcm_full_scale(bits_per_sample: u16) -> u32 {
    match bits_per_sample {
        0 => 0,
        bits if bits >= 32 => i32::MAX as u32,
        bits => (1u32 << (bits - 1)) - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_samples() {
        assert_eq!(
            Waveform::new(8000, Vec::new(), 32767),
            Err(AnalysisError::EmptySegment)
        );
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert!(matches!(
            Waveform::new(0, vec![1], 32767),
            Err(AnalysisError::InvalidWaveform(_))
        ));
    }

    #[test]
    fn rejects_zero_full_scale() {
        assert!(matches!(
            Waveform::new(8000, vec![1], 0),
            Err(AnalysisError::InvalidWaveform(_))
        ));
    }

    #[test]
    fn interleaved_selects_first_channel() {
        let interleaved = [1, 100, 2, 200, 3, 300];
        let wf = Waveform::from_interleaved(48000, &interleaved, 2, 32767).unwrap();
        assert_eq!(wf.samples(), &[1, 2, 3]);
        assert_eq!(wf.len(), 3);
        assert!(!wf.is_empty());
    }

    #[test]
    fn interleaved_mono_is_passthrough() {
        let wf = Waveform::from_interleaved(48000, &[5, 6, 7], 1, 32767).unwrap();
        assert_eq!(wf.samples(), &[5, 6, 7]);
    }

    #[test]
    fn interleaved_zero_channels_is_invalid() {
        assert!(matches!(
            Waveform::from_interleaved(48000, &[1, 2], 0, 32767),
            Err(AnalysisError::InvalidWaveform(_))
        ));
    }

    #[test]
    fn planar_selects_first_plane() {
        let planes = vec![vec![1, 2], vec![9, 9]];
        let wf = Waveform::from_planar(44100, &planes, 127).unwrap();
        assert_eq!(wf.samples(), &[1, 2]);
        assert_eq!(wf.bit_depth_max(), 127);
    }

    #[test]
    fn full_scale_for_common_depths() {
        assert_eq!(pcm_full_scale(8), 127);
        assert_eq!(pcm_full_scale(16), 32767);
        assert_eq!(pcm_full_scale(24), 8_388_607);
        assert_eq!(pcm_full_scale(32), 2_147_483_647);
    }

    #[test]
    fn duration() {
        let wf = Waveform::new(8000, vec![0; 4000], 32767).unwrap();
        assert!((wf.duration_secs() - 0.5).abs() < 1e-12);
    }
}
