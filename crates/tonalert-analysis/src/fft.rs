//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::{AnalysisError, Result};

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Symmetric Hann window, zero at both ends
    Hann,
}

impl Window {
    /// Apply window to a buffer
    ///
    /// The Hann window is the symmetric form
    /// `w[n] = 0.5 - 0.5 * cos(2*pi*n / (N - 1))`; a single-sample window is `[1.0]`.
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                if n < 2 {
                    return;
                }
                let denom = (n - 1) as f32;
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 - 0.5 * (2.0 * PI * i as f32 / denom).cos();
                    *sample *= w;
                }
            }
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Forward FFT processor for real input.
///
/// The plan is built once and can be shared across threads.
#[derive(Clone)]
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    ///
    /// Planning allocates in proportion to `size`, so callers should only
    /// plan sizes backed by real samples.
    /// Fails with [`AnalysisError::EmptySegment`] for a zero size.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(AnalysisError::EmptySegment);
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Ok(Self { fft, size })
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input
    ///
    /// Input shorter than the FFT size is zero-padded, longer input is
    /// truncated. Returns the one-sided spectrum: the first `size / 2` bins.
    /// The Nyquist bin of an even-sized transform is not included.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2);
        buffer
    }

    /// Center frequency of bin `k` in Hz.
    ///
    /// Computed in `f64`, so adjacent bins stay distinct even for
    /// transforms of many minutes of audio.
    pub fn bin_frequency(&self, k: usize, sample_rate: u32) -> f64 {
        k as f64 * f64::from(sample_rate) / self.size as f64
    }
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}
