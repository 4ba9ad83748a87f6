// SPDX-License-Identifier: MPL-2.0
//! Runtime flags and the startup bundle handed to the application.
//!
//! The application has no messages of its own: the
//! [`Session`](crate::session::Session) message enum is used as is.

use super::config::Config;
use super::services::Services;
use std::path::PathBuf;

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for `settings.toml` and
    /// `profile.toml`). Takes precedence over `HEARTSHIELD_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Optional profile file used instead of the default one.
    pub profile: Option<PathBuf>,
    /// Optional service base URL overriding `[service] base_url`.
    pub api_url: Option<String>,
}

/// Everything resolved before the window opens.
#[derive(Debug)]
pub struct Boot {
    pub flags: Flags,
    pub config: Config,
    /// i18n key of a warning raised while reading `settings.toml`.
    pub config_warning: Option<String>,
    pub services: Services,
}
