//! Analysis profiles for tonalert.
//!
//! A [`Profile`] is a named, TOML-serialisable bundle of analysis settings
//! that converts into a validated
//! [`AnalysisConfig`](tonalert_analysis::AnalysisConfig).
//!
//! - **Profiles**: load and save TOML files ([`Profile`])
//! - **Factory profiles**: `dbfs` and `resonance`, always available
//! - **Paths**: the per-user profile directory ([`paths`])
//!
//! # Example
//!
//! ```rust
//! use tonalert_config::{Profile, ProfileMode};
//!
//! let profile = Profile::new("hum")
//!     .with_mode(ProfileMode::FullSignal)
//!     .with_frequency_range(40.0, 70.0)
//!     .with_warning_threshold(20.0);
//!
//! let config = profile.to_analysis_config().unwrap();
//! assert_eq!(config.warning_threshold_db(), 20.0);
//! ```

mod error;
mod profile;

/// Platform-specific profile locations.
pub mod paths;

/// Factory profiles bundled with the library.
pub mod factory_profiles;

pub use error::ConfigError;
pub use factory_profiles::{
    FACTORY_PROFILE_NAMES, factory_profiles, get_factory_profile, is_factory_profile,
};
pub use paths::{find_profile, list_user_profiles, user_profiles_dir};
pub use profile::{Profile, ProfileMode, RangeConfig};

/// Resolve a profile by factory name, then by file path or user profile name.
pub fn resolve_profile(name: &str) -> Result<Profile, ConfigError> {
    if let Some(profile) = get_factory_profile(name) {
        return Ok(profile);
    }
    match find_profile(name) {
        Some(path) => Profile::load(path),
        None => Err(ConfigError::ProfileNotFound(name.to_string())),
    }
}
