//! Profile file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tonalert_analysis::{AnalysisConfig, AnalysisMode, DEFAULT_WINDOW_SIZE, FrequencyRange};

use crate::error::ConfigError;

/// Which analysis variant a profile selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    /// Hann-windowed first `window_size` samples, levels in dBFS.
    #[default]
    FixedWindow,
    /// Whole signal, levels relative to the median bin.
    FullSignal,
}

/// Frequency interval as stored in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lower bound in Hz (inclusive).
    pub low_hz: f64,
    /// Upper bound in Hz (inclusive).
    pub high_hz: f64,
}

/// Named analysis settings stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "resonance"
/// description = "Tonal energy above the noise floor"
/// mode = "full_signal"
/// warning_threshold_db = 30.0
///
/// [frequency_range]
/// low_hz = 1000.0
/// high_hz = 4000.0
/// ```
///
/// `window_size` defaults to 1024 and only matters in `fixed_window` mode.
/// A missing `warning_threshold_db` takes the mode's default
/// (-12 dBFS or 30 dB above baseline).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Name of the profile.
    pub name: String,

    /// Optional description of the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Analysis variant.
    #[serde(default)]
    pub mode: ProfileMode,

    /// FFT window length for fixed-window mode.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Warning level; the mode default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_threshold_db: Option<f32>,

    /// Optional peak-search interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_range: Option<RangeConfig>,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Profile {
    /// Create a fixed-window profile with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            mode: ProfileMode::FixedWindow,
            window_size: DEFAULT_WINDOW_SIZE,
            warning_threshold_db: None,
            frequency_range: None,
        }
    }

    /// Create a profile with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the analysis mode.
    pub fn with_mode(mut self, mode: ProfileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the warning level.
    pub fn with_warning_threshold(mut self, threshold_db: f32) -> Self {
        self.warning_threshold_db = Some(threshold_db);
        self
    }

    /// Set the frequency range.
    pub fn with_frequency_range(mut self, low_hz: f64, high_hz: f64) -> Self {
        self.frequency_range = Some(RangeConfig { low_hz, high_hz });
        self
    }

    /// Load a profile from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let profile: Profile = toml::from_str(&content)?;
        Ok(profile)
    }

    /// Load a profile from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the profile to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the profile to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The analysis mode this profile selects.
    pub fn analysis_mode(&self) -> AnalysisMode {
        match self.mode {
            ProfileMode::FixedWindow => AnalysisMode::FixedWindow {
                window_size: self.window_size,
            },
            ProfileMode::FullSignal => AnalysisMode::FullSignal,
        }
    }

    /// Validate the profile and build an [`AnalysisConfig`].
    pub fn to_analysis_config(&self) -> Result<AnalysisConfig, ConfigError> {
        let mode = self.analysis_mode();
        let threshold = self
            .warning_threshold_db
            .unwrap_or_else(|| mode.default_threshold_db());
        let range = self
            .frequency_range
            .map(|r| FrequencyRange::new(r.low_hz, r.high_hz))
            .transpose()?;
        Ok(AnalysisConfig::new(mode, threshold, range)?)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
