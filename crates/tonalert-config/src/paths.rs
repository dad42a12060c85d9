//! Platform-specific locations for user profiles.
//!
//! - Linux: `~/.config/tonalert/profiles/`
//! - macOS: `~/Library/Application Support/tonalert/profiles/`
//! - Windows: `%APPDATA%\tonalert\profiles\`

use std::path::{Path, PathBuf};

const APP_NAME: &str = "tonalert";
const PROFILES_SUBDIR: &str = "profiles";

/// Returns the user profiles directory.
///
/// Falls back to `./tonalert/profiles` if the config directory cannot be
/// determined.
pub fn user_profiles_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PROFILES_SUBDIR)
}

/// Find a profile file by name or path.
///
/// `name` is tried as a file path first, then as `<name>.toml` inside
/// [`user_profiles_dir`].
pub fn find_profile(name: &str) -> Option<PathBuf> {
    find_profile_in(name, &user_profiles_dir())
}

fn find_profile_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// List the profile files in the user profiles directory, sorted.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_profiles() -> Vec<PathBuf> {
    list_profiles_in_dir(&user_profiles_dir())
}

fn list_profiles_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut profiles: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    profiles.sort();
    profiles
}

/// Profile name from a file path (the file stem).
///
/// ```rust
/// use tonalert_config::paths::profile_name_from_path;
/// use std::path::Path;
///
/// let name = profile_name_from_path(Path::new("/path/to/hum.toml"));
/// assert_eq!(name, Some("hum".to_string()));
/// ```
pub fn profile_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
