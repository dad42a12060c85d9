//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tonalert_analysis::{Waveform, WaveformSource, pcm_full_scale};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

impl WavInfo {
    /// True if the file can be decoded into a [`Waveform`].
    pub fn is_analysable(&self) -> bool {
        self.format == WavFormat::Pcm
    }
}

/// Read WAV metadata without loading sample data.
///
/// Opens the file, reads the header, and returns a [`WavInfo`] struct
/// with format details and duration. This is much faster than
/// [`read_waveform`] for files where you only need metadata.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / spec.channels as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.sample_format.into(),
    })
}

/// Integer PCM WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Full-scale sample magnitude for this bit depth.
    pub fn full_scale(&self) -> u32 {
        pcm_full_scale(self.bits_per_sample)
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// Decodes integer PCM WAV data into [`Waveform`]s.
///
/// Multi-channel files are reduced to channel 0; channels are never mixed.
pub struct WavSource<R: Read> {
    reader: WavReader<R>,
}

impl WavSource<BufReader<File>> {
    /// Open a WAV file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            reader: WavReader::open(path)?,
        })
    }
}

impl<R: Read> WavSource<R> {
    /// Wrap any reader positioned at the start of a WAV stream.
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            reader: WavReader::new(reader)?,
        })
    }

    /// Header of the stream being decoded.
    pub fn spec(&self) -> WavSpec {
        WavSpec::from(self.reader.spec())
    }
}

impl<R: Read> WaveformSource for WavSource<R> {
    type Error = Error;

    /// Decode all remaining samples.
    ///
    /// A second call on the same source finds no samples left and fails.
    fn read_waveform(&mut self) -> Result<Waveform> {
        let hound_spec = self.reader.spec();
        if hound_spec.sample_format == SampleFormat::Float {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit IEEE float (only integer PCM can be analysed)",
                hound_spec.bits_per_sample
            )));
        }
        let spec = WavSpec::from(hound_spec);

        let interleaved = self
            .reader
            .samples::<i32>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            bits_per_sample = spec.bits_per_sample,
            samples = interleaved.len(),
            "decoded WAV"
        );

        Ok(Waveform::from_interleaved(
            spec.sample_rate,
            &interleaved,
            spec.channels as usize,
            spec.full_scale(),
        )?)
    }
}

/// Read an integer PCM WAV file as a [`Waveform`].
///
/// # Example
/// ```ignore
/// let waveform = read_waveform("input.wav")?;
/// println!("Loaded {} samples at {} Hz", waveform.len(), waveform.sample_rate());
/// ```
pub fn read_waveform<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    WavSource::open(path)?.read_waveform()
}

/// Write interleaved integer samples to a PCM WAV file.
///
/// Samples outside the bit depth's range are clamped.
///
/// # Example
/// ```ignore
/// let samples = vec![0i32; 48000]; // 1 second of silence
/// let spec = WavSpec { sample_rate: 48000, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[i32], spec: WavSpec) -> Result<()> {
    if !matches!(spec.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit PCM",
            spec.bits_per_sample
        )));
    }
    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    let max_val = spec.full_scale() as i64;
    for &sample in samples {
        let clamped = (sample as i64).clamp(-max_val - 1, max_val) as i32;
        match spec.bits_per_sample {
            8 => writer.write_sample(clamped as i8)?,
            16 => writer.write_sample(clamped as i16)?,
            _ => writer.write_sample(clamped)?,
        }
    }

    writer.finalize()?;
    Ok(())
}
