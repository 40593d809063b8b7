//! Subscriber setup for the binary.
//!
//! Diagnostics go to stderr so view output on stdout stays clean. An
//! optional log file receives the same events without colour.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Level used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Local wall-clock timestamps with millisecond precision and UTC offset.
#[derive(Debug, Clone, Copy, Default)]
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Picks the active filter.
///
/// With `prefer_env`, a valid `RUST_LOG` wins over `level`. Otherwise `level`
/// is used as-is: a bare level ("warn", "debug") or any full directive
/// ("paye_cli=debug,sqlx=warn").
pub fn build_filter(
    level: &str,
    prefer_env: bool,
) -> Result<EnvFilter> {
    if prefer_env {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber from resolved settings. Call once, after
/// the config file and flags are merged.
///
/// `prefer_env` lets `RUST_LOG` override `config.level`; the binary passes
/// `false` when `--log-level` was given.
pub fn init_logging(
    config: &LoggingConfig,
    prefer_env: bool,
) -> Result<()> {
    let filter = build_filter(&config.level, prefer_env)?;

    let file_layer = config
        .file
        .as_deref()
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("logging is already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_levels_and_directives() {
        assert!(build_filter(DEFAULT_LOG_LEVEL, false).is_ok());
        assert!(build_filter("paye_cli=debug,sqlx=warn", false).is_ok());
    }

    #[test]
    fn filter_rejects_unknown_level() {
        let err = build_filter("paye_core=loud", false).unwrap_err();
        assert!(err.to_string().contains("paye_core=loud"));
    }

    #[test]
    fn missing_log_directory_is_reported_before_install() {
        let config = LoggingConfig {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: Some(
                std::env::temp_dir()
                    .join(format!("taxclarity-no-such-dir-{}", std::process::id()))
                    .join("taxclarity.log"),
            ),
        };

        let err = init_logging(&config, false).unwrap_err();
        assert!(err.to_string().contains("cannot open log file"));
    }
}
