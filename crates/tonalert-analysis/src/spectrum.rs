//! One-sided dB spectra and the stages that derive new spectra from them.
//!
//! Every stage returns a new [`Spectrum`]; nothing is mutated in place.

use rustfft::num_complex::Complex;
use serde::Serialize;

use crate::config::FrequencyRange;
use crate::error::{AnalysisError, Result};
use crate::fft::Fft;

/// Paired frequency (Hz) and magnitude (dB) sequences.
///
/// Frequencies are finite and strictly increasing. Magnitudes are never
/// NaN but may be `-inf` for bins with zero energy.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes_db: Vec<f32>,
}

impl Spectrum {
    /// Build a spectrum from parallel sequences.
    pub fn new(frequencies: Vec<f64>, magnitudes_db: Vec<f32>) -> Result<Self> {
        if frequencies.len() != magnitudes_db.len() {
            return Err(AnalysisError::InvalidSpectrum(format!(
                "{} frequencies but {} magnitudes",
                frequencies.len(),
                magnitudes_db.len()
            )));
        }
        if let Some(f) = frequencies.iter().find(|f| !f.is_finite()) {
            return Err(AnalysisError::InvalidSpectrum(format!(
                "frequency {f} is not finite"
            )));
        }
        if frequencies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::InvalidSpectrum(
                "frequencies must be strictly increasing".to_string(),
            ));
        }
        if magnitudes_db.iter().any(|m| m.is_nan()) {
            return Err(AnalysisError::InvalidSpectrum(
                "magnitudes must not be NaN".to_string(),
            ));
        }
        Ok(Self {
            frequencies,
            magnitudes_db,
        })
    }

    /// Transform a prepared segment into a dBFS spectrum.
    ///
    /// Each retained bin is scaled by `2 / M` and referenced to `full_scale`.
    pub fn from_segment(segment: &[f32], sample_rate: u32, full_scale: u32) -> Result<Self> {
        let fft = Fft::new(segment.len())?;
        Self::from_fft(&fft, segment, sample_rate, full_scale)
    }

    /// Like [`Spectrum::from_segment`] but with a pre-planned FFT.
    pub(crate) fn from_fft(
        fft: &Fft,
        segment: &[f32],
        sample_rate: u32,
        full_scale: u32,
    ) -> Result<Self> {
        let bins = fft.forward(segment);
        let frequencies = (0..bins.len())
            .map(|k| fft.bin_frequency(k, sample_rate))
            .collect();
        let magnitudes_db = magnitudes_dbfs(&bins, fft.size(), full_scale as f32);
        Self::new(frequencies, magnitudes_db)
    }

    /// An empty spectrum.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bin frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Bin magnitudes in dB.
    pub fn magnitudes_db(&self) -> &[f32] {
        &self.magnitudes_db
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate `(frequency_hz, magnitude_db)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes_db.iter().copied())
    }

    /// A copy with `offset_db` added to every magnitude.
    pub fn offset(&self, offset_db: f32) -> Self {
        Self {
            frequencies: self.frequencies.clone(),
            magnitudes_db: self.magnitudes_db.iter().map(|&m| m + offset_db).collect(),
        }
    }

    /// Median magnitude: element `len / 2` of the magnitudes sorted under
    /// total ordering, so `-inf` sorts below every finite value.
    ///
    /// Returns `None` for an empty spectrum.
    pub fn median_db(&self) -> Option<f32> {
        if self.magnitudes_db.is_empty() {
            return None;
        }
        let mut sorted = self.magnitudes_db.clone();
        sorted.sort_by(f32::total_cmp);
        Some(sorted[sorted.len() / 2])
    }

    /// Keep only bins whose frequency lies in the closed `range`.
    ///
    /// Because frequencies are sorted, the result is a contiguous slice of
    /// this spectrum. It is empty if no bin falls in range.
    pub fn restrict(&self, range: FrequencyRange) -> Self {
        let start = self.frequencies.partition_point(|&f| f < range.low_hz());
        let end = self.frequencies.partition_point(|&f| f <= range.high_hz());
        if start >= end {
            return Self::empty();
        }
        Self {
            frequencies: self.frequencies[start..end].to_vec(),
            magnitudes_db: self.magnitudes_db[start..end].to_vec(),
        }
    }
}

/// Convert one-sided FFT bins to dB relative to `full_scale`.
///
/// `transform_len` is the FFT size `M`. Every bin is scaled by `2 / M`,
/// including DC and (for even `M`) Nyquist. A zero bin maps to `-inf`.
pub fn magnitudes_dbfs(bins: &[Complex<f32>], transform_len: usize, full_scale: f32) -> Vec<f32> {
    let scale = 2.0 / transform_len as f32;
    bins.iter()
        .map(|c| {
            let normalized = scale * c.norm();
            20.0 * (normalized / full_scale).log10()
        })
        .collect()
}

/// Shift a spectrum so its median sits at 0 dB.
///
/// Returns the centered spectrum and the offset that was added. When the
/// median is not finite (more than half the bins are silent) no centering is
/// possible, and the spectrum is returned unchanged with an offset of 0.
pub fn center_on_baseline(spectrum: &Spectrum) -> (Spectrum, f32) {
    let offset = match spectrum.median_db() {
        Some(median) if median.is_finite() => -median,
        Some(_median) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                median = _median,
                "spectrum median is not finite, skipping baseline centering"
            );
            0.0
        }
        None => 0.0,
    };
    (spectrum.offset(offset), offset)
}

/// Loudest bin of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakResult {
    /// Frequency of the peak bin in Hz.
    pub frequency_hz: f64,
    /// Magnitude of the peak bin in dB.
    pub amplitude_db: f32,
}

/// Find the maximum-magnitude bin.
///
/// Ties go to the lowest frequency, and `-inf` loses to every finite value,
/// so an all-silent spectrum peaks at its first bin.
/// Fails with [`AnalysisError::NoBinsInRange`] on an empty spectrum.
pub fn find_peak(spectrum: &Spectrum) -> Result<PeakResult> {
    let mut iter = spectrum.iter();
    let first = iter.next().ok_or(AnalysisError::NoBinsInRange)?;
    let (frequency_hz, amplitude_db) =
        iter.fold(first, |best, bin| if bin.1 > best.1 { bin } else { best });
    Ok(PeakResult {
        frequency_hz,
        amplitude_db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(mags: &[f32]) -> Spectrum {
        let freqs = (0..mags.len()).map(|i| i as f64 * 10.0).collect();
        Spectrum::new(freqs, mags.to_vec()).unwrap()
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let result = Spectrum::new(vec![0.0, 1.0], vec![0.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidSpectrum(_))));
    }

    #[test]
    fn new_rejects_unsorted_frequencies() {
        let result = Spectrum::new(vec![0.0, 2.0, 1.0], vec![0.0; 3]);
        assert!(matches!(result, Err(AnalysisError::InvalidSpectrum(_))));
    }

    #[test]
    fn new_rejects_non_finite_frequencies() {
        let result = Spectrum::new(vec![f64::NAN, 10.0], vec![0.0, 0.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidSpectrum(_))));
        let result = Spectrum::new(vec![0.0, f64::INFINITY], vec![0.0, 0.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidSpectrum(_))));
    }

    #[test]
    fn new_rejects_nan_magnitudes() {
        let result = Spectrum::new(vec![0.0, 10.0], vec![f32::NAN, -3.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidSpectrum(_))));
    }

    #[test]
    fn new_accepts_neg_inf_magnitudes() {
        let s = Spectrum::new(vec![0.0, 10.0], vec![f32::NEG_INFINITY, -3.0]).unwrap();
        assert_eq!(find_peak(&s).unwrap().frequency_hz, 10.0);
    }

    #[test]
    fn normalization_of_full_scale_bin() {
        // |X| = M/2 * full_scale → normalized = full_scale → 0 dBFS
        let bins = [Complex::new(512.0 * 100.0, 0.0)];
        let db = magnitudes_dbfs(&bins, 1024, 100.0);
        assert!(db[0].abs() < 1e-4, "got {}", db[0]);
    }

    #[test]
    fn normalization_of_zero_bin_is_neg_inf() {
        let db = magnitudes_dbfs(&[Complex::new(0.0, 0.0)], 16, 32767.0);
        assert_eq!(db[0], f32::NEG_INFINITY);
    }

    #[test]
    fn from_segment_frequencies() {
        let s = Spectrum::from_segment(&[0.0; 8], 8000, 32767).unwrap();
        assert_eq!(s.frequencies(), &[0.0, 1000.0, 2000.0, 3000.0]);
    }

    #[test]
    fn from_segment_empty_is_error() {
        assert_eq!(
            Spectrum::from_segment(&[], 8000, 32767),
            Err(AnalysisError::EmptySegment)
        );
    }

    #[test]
    fn median_uses_upper_middle_element() {
        assert_eq!(spectrum(&[4.0, 1.0, 3.0, 2.0]).median_db(), Some(3.0));
        assert_eq!(spectrum(&[5.0, 1.0, 3.0]).median_db(), Some(3.0));
        assert_eq!(Spectrum::empty().median_db(), None);
    }

    #[test]
    fn median_orders_neg_inf_lowest() {
        let s = spectrum(&[f32::NEG_INFINITY, -10.0, -20.0]);
        assert_eq!(s.median_db(), Some(-20.0));
    }

    #[test]
    fn centering_puts_median_at_zero() {
        let s = spectrum(&[-80.0, -60.0, -40.0, -20.0, -70.0]);
        let (centered, offset) = center_on_baseline(&s);
        assert_eq!(offset, 60.0);
        assert_eq!(centered.median_db(), Some(0.0));
        assert_eq!(centered.magnitudes_db()[3], 40.0);
        assert_eq!(centered.frequencies(), s.frequencies());
    }

    #[test]
    fn centering_skips_non_finite_median() {
        let s = spectrum(&[f32::NEG_INFINITY, f32::NEG_INFINITY, -3.0]);
        let (centered, offset) = center_on_baseline(&s);
        assert_eq!(offset, 0.0);
        assert_eq!(centered, s);
    }

    #[test]
    fn restrict_is_inclusive() {
        let s = spectrum(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let r = s.restrict(FrequencyRange::new(10.0, 30.0).unwrap());
        assert_eq!(r.frequencies(), &[10.0, 20.0, 30.0]);
        assert_eq!(r.magnitudes_db(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn restrict_outside_is_empty() {
        let s = spectrum(&[0.0, 1.0, 2.0]);
        let r = s.restrict(FrequencyRange::new(100.0, 200.0).unwrap());
        assert!(r.is_empty());
        let r = s.restrict(FrequencyRange::new(1.0, 9.0).unwrap());
        assert!(r.is_empty());
    }

    #[test]
    fn peak_picks_max() {
        let peak = find_peak(&spectrum(&[-10.0, -3.0, -7.0])).unwrap();
        assert_eq!(peak.frequency_hz, 10.0);
        assert_eq!(peak.amplitude_db, -3.0);
    }

    #[test]
    fn peak_tie_goes_to_lowest_frequency() {
        let peak = find_peak(&spectrum(&[-5.0, -1.0, -1.0])).unwrap();
        assert_eq!(peak.frequency_hz, 10.0);
    }

    #[test]
    fn peak_of_silence_is_first_bin() {
        let peak = find_peak(&spectrum(&[f32::NEG_INFINITY; 4])).unwrap();
        assert_eq!(peak.frequency_hz, 0.0);
        assert_eq!(peak.amplitude_db, f32::NEG_INFINITY);
    }

    #[test]
    fn peak_of_empty_is_error() {
        assert_eq!(
            find_peak(&Spectrum::empty()),
            Err(AnalysisError::NoBinsInRange)
        );
    }
}
