//! Warning-level evaluation of a spectral peak.

use serde::Serialize;

use crate::config::{FrequencyRange, LevelScale};
use crate::spectrum::PeakResult;

/// Outcome of comparing a peak against the warning level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// True when the peak is strictly above the warning level.
    pub exceeded: bool,
    /// Human-readable description with two-decimal figures.
    pub message: String,
}

/// True when `amplitude_db` is strictly greater than `threshold_db`.
///
/// Equality does not warn.
pub fn exceeds(amplitude_db: f32, threshold_db: f32) -> bool {
    amplitude_db > threshold_db
}

/// Compares peaks against a fixed warning level.
///
/// The evaluator only builds a [`Verdict`]; printing or logging it is up to
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEvaluator {
    warning_threshold_db: f32,
    scale: LevelScale,
    range: Option<FrequencyRange>,
}

impl ThresholdEvaluator {
    /// Create an evaluator reporting levels in `scale`.
    pub fn new(warning_threshold_db: f32, scale: LevelScale) -> Self {
        Self {
            warning_threshold_db,
            scale,
            range: None,
        }
    }

    /// Mention the searched frequency range in messages.
    pub fn with_range(mut self, range: Option<FrequencyRange>) -> Self {
        self.range = range;
        self
    }

    /// Warning level.
    pub fn warning_threshold_db(&self) -> f32 {
        self.warning_threshold_db
    }

    /// Evaluate a peak.
    pub fn evaluate(&self, peak: &PeakResult) -> Verdict {
        let exceeded = exceeds(peak.amplitude_db, self.warning_threshold_db);
        let unit = self.scale;
        let mut message = if exceeded {
            format!(
                "Warning: Peak value {:.2} {unit} at {:.2} Hz exceeds warning level of {:.2} {unit}",
                peak.amplitude_db, peak.frequency_hz, self.warning_threshold_db
            )
        } else {
            format!(
                "No warning: Peak value {:.2} {unit} at {:.2} Hz is within warning level of {:.2} {unit}",
                peak.amplitude_db, peak.frequency_hz, self.warning_threshold_db
            )
        };
        if let Some(range) = self.range {
            message.push_str(&format!(
                " in the range {:.2} Hz to {:.2} Hz",
                range.low_hz(),
                range.high_hz()
            ));
        }
        Verdict { exceeded, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(amplitude_db: f32) -> PeakResult {
        PeakResult {
            frequency_hz: 2000.0,
            amplitude_db,
        }
    }

    #[test]
    fn just_above_threshold_warns() {
        let eval = ThresholdEvaluator::new(-12.0, LevelScale::Dbfs);
        assert!(eval.evaluate(&peak(-11.99)).exceeded);
    }

    #[test]
    fn equal_to_threshold_does_not_warn() {
        let eval = ThresholdEvaluator::new(-12.0, LevelScale::Dbfs);
        assert!(!eval.evaluate(&peak(-12.0)).exceeded);
    }

    #[test]
    fn warning_message_format() {
        let eval = ThresholdEvaluator::new(-12.0, LevelScale::Dbfs);
        let verdict = eval.evaluate(&peak(-6.0206));
        assert_eq!(
            verdict.message,
            "Warning: Peak value -6.02 dBFS at 2000.00 Hz exceeds warning level of -12.00 dBFS"
        );
    }

    #[test]
    fn silent_peak_message() {
        let eval = ThresholdEvaluator::new(-12.0, LevelScale::Dbfs);
        let verdict = eval.evaluate(&PeakResult {
            frequency_hz: 0.0,
            amplitude_db: f32::NEG_INFINITY,
        });
        assert!(!verdict.exceeded);
        assert!(verdict.message.starts_with("No warning"));
        assert!(verdict.message.contains("-inf"), "{}", verdict.message);
    }

    #[test]
    fn range_is_mentioned() {
        let range = FrequencyRange::new(1000.0, 4000.0).unwrap();
        let eval = ThresholdEvaluator::new(30.0, LevelScale::AboveBaseline).with_range(Some(range));
        let verdict = eval.evaluate(&peak(35.5));
        assert!(verdict.exceeded);
        assert!(verdict.message.ends_with("in the range 1000.00 Hz to 4000.00 Hz"));
        assert!(verdict.message.contains("35.50 dB at"));
    }
}
