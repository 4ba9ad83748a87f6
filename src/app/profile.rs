// SPDX-License-Identifier: MPL-2.0
//! Loading of the stored user profile used by smart fill.
//!
//! The profile is a small TOML file:
//!
//! ```toml
//! age = 52
//! height = "170"
//! weight = 81.5
//! gender = "male"
//! ```
//!
//! Every key is optional and may be a number or a string. The file is taken
//! from `--profile` if given, otherwise `profile.toml` in the config
//! directory. A missing file means no profile.

use crate::app::paths;
use crate::domain::risk::UserProfile;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "profile.toml";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl ProfileValue {
    fn into_text(self) -> String {
        match self {
            ProfileValue::Text(text) => text,
            ProfileValue::Integer(n) => n.to_string(),
            ProfileValue::Float(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    age: Option<ProfileValue>,
    #[serde(default)]
    height: Option<ProfileValue>,
    #[serde(default)]
    weight: Option<ProfileValue>,
    #[serde(default)]
    gender: Option<ProfileValue>,
}

impl From<ProfileFile> for UserProfile {
    fn from(file: ProfileFile) -> Self {
        UserProfile {
            age: file.age.map(ProfileValue::into_text),
            height: file.height.map(ProfileValue::into_text),
            weight: file.weight.map(ProfileValue::into_text),
            gender: file.gender.map(ProfileValue::into_text),
        }
    }
}

/// Parses a profile from a specific path.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a config error if it
/// is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<UserProfile> {
    let content = fs::read_to_string(path)?;
    let file: ProfileFile = toml::from_str(&content)?;
    Ok(file.into())
}

/// Loads the profile from `explicit` or the default location.
///
/// Returns `(profile, optional_warning_key)`. An explicitly requested file
/// that cannot be read yields a warning; an absent default file does not.
pub fn load(explicit: Option<PathBuf>) -> (Option<UserProfile>, Option<String>) {
    load_with_override(explicit, None)
}

/// Like [`load`] with an explicit config directory (for tests).
pub fn load_with_override(
    explicit: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> (Option<UserProfile>, Option<String>) {
    let requested = explicit.is_some();
    let path = explicit.or_else(|| {
        paths::get_app_config_dir_with_override(config_dir).map(|mut dir| {
            dir.push(PROFILE_FILE);
            dir
        })
    });

    let Some(path) = path else {
        return (None, None);
    };
    if !requested && !path.exists() {
        return (None, None);
    }

    match load_from_path(&path) {
        Ok(profile) => {
            tracing::info!(path = %path.display(), "user profile loaded");
            (Some(profile), None)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "user profile ignored");
            (None, Some("notification-profile-load-error".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn numbers_and_strings_are_accepted() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("me.toml");
        fs::write(&path, "age = 52\nheight = \"170\"\nweight = 81.5\ngender = \"M\"").expect("write");

        let profile = load_from_path(&path).expect("load");
        assert_eq!(profile.age.as_deref(), Some("52"));
        assert_eq!(profile.height.as_deref(), Some("170"));
        assert_eq!(profile.weight.as_deref(), Some("81.5"));
        assert_eq!(profile.gender.as_deref(), Some("M"));
    }

    #[test]
    fn missing_keys_stay_absent() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("me.toml");
        fs::write(&path, "age = 40").expect("write");

        let profile = load_from_path(&path).expect("load");
        assert_eq!(profile.age.as_deref(), Some("40"));
        assert!(profile.height.is_none());
        assert!(profile.gender.is_none());
    }

    #[test]
    fn absent_default_file_is_silent() {
        let dir = tempdir().expect("temp dir");
        let (profile, warning) = load_with_override(None, Some(dir.path().to_path_buf()));
        assert!(profile.is_none());
        assert!(warning.is_none());
    }

    #[test]
    fn default_file_in_config_dir_is_used() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(PROFILE_FILE), "gender = \"female\"").expect("write");
        let (profile, warning) = load_with_override(None, Some(dir.path().to_path_buf()));
        assert_eq!(profile.and_then(|p| p.gender).as_deref(), Some("female"));
        assert!(warning.is_none());
    }

    #[test]
    fn missing_explicit_file_warns() {
        let dir = tempdir().expect("temp dir");
        let (profile, warning) = load(Some(dir.path().join("nope.toml")));
        assert!(profile.is_none());
        assert_eq!(warning.as_deref(), Some("notification-profile-load-error"));
    }
}
