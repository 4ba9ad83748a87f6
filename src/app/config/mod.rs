// SPDX-License-Identifier: MPL-2.0
//! Loading of the `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - UI language
//! - `[service]` - collaborator base URL and request timeout
//! - `[camera]` - camera capability and device
//! - `[location]` - geolocation provider for the specialist search
//! - `[hospital]` - specialist-search links
//! - `[logging]` - tracing filter
//!
//! Every key is optional. The file is only read; the application never
//! writes it.
//!
//! # Examples
//!
//! ```no_run
//! use heartshield::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings ignored: {key}");
//! }
//! println!("service: {}", config.service_url());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::hospital::{DEFAULT_NEARBY_TEMPLATE, DEFAULT_SEARCH_URL};
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default)]
    pub language: Option<String>,
}

/// Remote service settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Base URL; `extract`, `predict` and `feedback` resolve below it.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Set to `false` to hide the camera even when the build supports it.
    #[serde(default = "default_camera_enabled")]
    pub enabled: Option<bool>,

    /// Platform device name (`/dev/video2`, `0`, `video=USB Camera`).
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: default_camera_enabled(),
            device: None,
        }
    }
}

/// Where the user's position comes from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LocationProviderKind {
    /// Never locate; always use the generic search.
    #[default]
    None,
    /// Use `latitude` and `longitude` from this section.
    Fixed,
    /// Ask an IP geolocation service.
    IpLookup,
}

/// Geolocation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationProviderKind,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Endpoint for the `ip-lookup` provider.
    #[serde(default)]
    pub lookup_url: Option<String>,
}

/// Specialist-search links.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct HospitalConfig {
    #[serde(default)]
    pub search_url: Option<String>,

    /// Coordinate-anchored search with `{lat}` and `{lng}` placeholders.
    #[serde(default)]
    pub nearby_url_template: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `heartshield=debug`.
    #[serde(default)]
    pub filter: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub hospital: HospitalConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Service base URL, falling back to the default.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.service
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_SERVICE_URL)
    }

    /// Request timeout clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .service
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn camera_enabled(&self) -> bool {
        self.camera.enabled.unwrap_or(DEFAULT_CAMERA_ENABLED)
    }

    #[must_use]
    pub fn hospital_search_url(&self) -> &str {
        self.hospital
            .search_url
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_URL)
    }

    #[must_use]
    pub fn hospital_nearby_template(&self) -> &str {
        self.hospital
            .nearby_url_template
            .as_deref()
            .unwrap_or(DEFAULT_NEARBY_TEMPLATE)
    }

    #[must_use]
    pub fn location_lookup_url(&self) -> &str {
        self.location
            .lookup_url
            .as_deref()
            .unwrap_or(DEFAULT_LOCATION_LOOKUP_URL)
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.logging
            .filter
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_camera_enabled() -> Option<bool> {
    Some(DEFAULT_CAMERA_ENABLED)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "settings ignored");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a config error if it
/// is not valid TOML for this schema.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.service_url(), DEFAULT_SERVICE_URL);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(config.camera_enabled());
        assert_eq!(config.location.provider, LocationProviderKind::None);
        assert_eq!(config.hospital_search_url(), DEFAULT_SEARCH_URL);
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn sectioned_format_loads_correctly() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            r#"
[general]
language = "fr"

[service]
base_url = "https://heartshield.example/api"
request_timeout_secs = 15

[camera]
enabled = false
device = "/dev/video2"

[location]
provider = "fixed"
latitude = 48.85
longitude = 2.35

[logging]
filter = "heartshield=debug"
"#,
        )
        .expect("write");

        let config = load_from_path(&config_path).expect("load");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        assert_eq!(config.service_url(), "https://heartshield.example/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(!config.camera_enabled());
        assert_eq!(config.camera.device.as_deref(), Some("/dev/video2"));
        assert_eq!(config.location.provider, LocationProviderKind::Fixed);
        assert_eq!(config.location.latitude, Some(48.85));
        assert_eq!(config.log_filter(), "heartshield=debug");
    }

    #[test]
    fn ip_lookup_provider_is_kebab_case() {
        let config: Config = toml::from_str("[location]\nprovider = \"ip-lookup\"").expect("parse");
        assert_eq!(config.location.provider, LocationProviderKind::IpLookup);
        assert_eq!(config.location_lookup_url(), DEFAULT_LOCATION_LOOKUP_URL);
    }

    #[test]
    fn request_timeout_is_clamped() {
        let config: Config =
            toml::from_str("[service]\nrequest_timeout_secs = 0").expect("parse");
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn blank_base_url_uses_default() {
        let config: Config = toml::from_str("[service]\nbase_url = \"  \"").expect("parse");
        assert_eq!(config.service_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[service\nbase_url = ").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }
}
