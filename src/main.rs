// SPDX-License-Identifier: MPL-2.0
use heartshield::app::{self, config, paths, Boot, Flags, Services};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
HeartShield

USAGE:
  heartshield [OPTIONS]

OPTIONS:
  --lang <LOCALE>        UI language (e.g. en-US, fr)
  --config-dir <DIR>     Directory holding settings.toml and profile.toml
  --profile <FILE>       Profile file used for smart fill
  --api-url <URL>        Base URL of the HeartShield services
  -h, --help             Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        profile: args.opt_value_from_str::<_, PathBuf>("--profile")?,
        api_url: args.opt_value_from_str("--api-url")?,
    };
    for unknown in args.finish() {
        eprintln!("warning: ignoring argument {}", unknown.to_string_lossy());
    }
    Ok(Some(flags))
}

/// `RUST_LOG` wins over `[logging] filter`, which wins over the default.
fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    let (config, config_warning) = config::load();
    init_tracing(&config);
    if let Some(key) = &config_warning {
        tracing::warn!(key, "settings file could not be used; defaults applied");
    }

    let services = match Services::from_config(&config, flags.api_url.as_deref()) {
        Ok(services) => services,
        Err(err) => {
            tracing::error!(error = %err, "collaborators could not be registered");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let boot = Boot {
        flags,
        config,
        config_warning,
        services,
    };
    match app::run(boot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
