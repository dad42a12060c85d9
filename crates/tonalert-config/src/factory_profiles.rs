//! Factory profiles bundled with the library.
//!
//! These are embedded at compile time and always available without any
//! files on disk.

use crate::Profile;

/// Names of the factory profiles, in listing order.
pub static FACTORY_PROFILE_NAMES: &[&str] = &["dbfs", "resonance"];

static FACTORY_PROFILES_TOML: &[(&str, &str)] = &[
    ("dbfs", DBFS_PROFILE),
    ("resonance", RESONANCE_PROFILE),
];

/// First 1024 samples against an absolute -12 dBFS ceiling.
const DBFS_PROFILE: &str = r#"
name = "dbfs"
description = "Hann-windowed first 1024 samples, warn above -12 dBFS"
mode = "fixed_window"
window_size = 1024
warning_threshold_db = -12.0
"#;

/// Whole signal, peaks measured against the median bin.
const RESONANCE_PROFILE: &str = r#"
name = "resonance"
description = "Whole signal, warn when a 1-4 kHz peak stands 30 dB above the median"
mode = "full_signal"
warning_threshold_db = 30.0

[frequency_range]
low_hz = 1000.0
high_hz = 4000.0
"#;

/// All factory profiles, parsed.
pub fn factory_profiles() -> Vec<Profile> {
    FACTORY_PROFILES_TOML
        .iter()
        .filter_map(|(_, toml)| Profile::from_toml(toml).ok())
        .collect()
}

/// Get a factory profile by name (case-insensitive).
///
/// ```rust
/// use tonalert_config::get_factory_profile;
///
/// let profile = get_factory_profile("Resonance").unwrap();
/// assert_eq!(profile.name, "resonance");
/// ```
pub fn get_factory_profile(name: &str) -> Option<Profile> {
    FACTORY_PROFILES_TOML
        .iter()
        .find(|(profile_name, _)| profile_name.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| Profile::from_toml(toml).ok())
}

/// True if `name` matches a factory profile (case-insensitive).
pub fn is_factory_profile(name: &str) -> bool {
    FACTORY_PROFILE_NAMES
        .iter()
        .any(|profile_name| profile_name.eq_ignore_ascii_case(name))
}
