// SPDX-License-Identifier: MPL-2.0
use heartshield::app::{config, profile, Boot, Flags, Services, App};
use heartshield::domain::risk::FieldName;
use heartshield::i18n::fluent::I18n;
use std::fs;
use tempfile::tempdir;

#[test]
fn config_directory_drives_language_services_and_profile() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join("settings.toml"),
        r#"
[general]
language = "fr"

[service]
base_url = "https://api.heartshield.example/v1"

[location]
provider = "fixed"
latitude = 43.6
longitude = 1.44

[hospital]
search_url = "https://maps.example/search?q=cardiologue"
"#,
    )
    .expect("write settings");
    fs::write(dir.path().join("profile.toml"), "age = 61\ngender = \"m\"").expect("write profile");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(config.service_url(), "https://api.heartshield.example/v1");
    assert_eq!(config.hospital_search_url(), "https://maps.example/search?q=cardiologue");

    let i18n = I18n::new(None, &config);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("result-tier-high"), "Risque élevé");

    let services = Services::from_config(&config, None).expect("services");
    assert!(services.capabilities().location);

    let (stored, warning) = profile::load_with_override(None, Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    let stored = stored.expect("profile");
    assert_eq!(stored.get(FieldName::Age), Some("61"));
}

#[test]
fn cli_language_overrides_settings() {
    let config: config::Config = toml::from_str("[general]\nlanguage = \"fr\"").expect("parse");
    let i18n = I18n::new(Some("en-US".into()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn api_url_flag_overrides_settings() {
    let config: config::Config =
        toml::from_str("[service]\nbase_url = \"ftp://invalid\"").expect("parse");
    assert!(Services::from_config(&config, None).is_err());
    assert!(Services::from_config(&config, Some("http://localhost:5000")).is_ok());
}

#[test]
fn broken_settings_start_with_defaults_and_a_toast() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("settings.toml"), "[service\n").expect("write");

    let (config, config_warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config, config::Config::default());
    assert_eq!(config_warning.as_deref(), Some("notification-config-load-error"));

    let services = Services::from_config(&config, None).expect("services");
    let app = App::new(Boot {
        flags: Flags {
            lang: Some("en-US".into()),
            profile: Some(dir.path().join("missing-profile.toml")),
            ..Flags::default()
        },
        config,
        config_warning,
        services,
    });
    assert_eq!(app.session().notifications().visible_count(), 2);
}
