//! ---
//! hostsim_section: "01-core-functionality"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Shared primitives and utilities for the generator runtime."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "HOSTSIM_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

static GUARDS: OnceCell<Vec<WorkerGuard>> = OnceCell::new();

/// Console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Initialize the tracing subscriber for a generator process.
///
/// Diagnostics always go to stderr; stdout carries generated series when the
/// output path is `-`. `HOSTSIM_LOG` takes precedence over `RUST_LOG`, and the
/// filter falls back to `info`. With `logging.file` enabled a daily rolling
/// JSON log is also kept under `logging.directory`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    let mut guards = Vec::with_capacity(2);

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    guards.push(stderr_guard);
    let console_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(stderr_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stderr_writer)
            .boxed(),
    };

    let file_layer = if config.file {
        std::fs::create_dir_all(&config.directory).with_context(|| {
            format!("unable to create log directory {}", config.directory.display())
        })?;
        let prefix = config.file_prefix.as_deref().unwrap_or(service_name);
        let (file_writer, file_guard) =
            tracing_appender::non_blocking(daily(&config.directory, format!("{prefix}.log")));
        guards.push(file_guard);
        Some(
            fmt::layer()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .json()
                .with_writer(file_writer)
                .boxed(),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();
    if installed {
        let _ = GUARDS.set(guards);
    }

    info!(
        service = %service_name,
        format = ?config.format,
        log_file = config.file,
        "tracing initialised; series output is never mixed with logs"
    );
    Ok(())
}

fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {LOG_ENV} directive ({err}); defaulting to {DEFAULT_DIRECTIVE}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_matches_missing_logging_section() {
        assert_eq!(LogFormat::default(), LoggingConfig::default().format);
        let config: crate::GeneratorConfig = "".parse().unwrap();
        assert_eq!(config.logging.format, LogFormat::default());
    }

    #[test]
    fn file_logging_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            ..LoggingConfig::default()
        };
        assert!(!config.file);
        init_tracing("hostsim-test", &config).unwrap();
        assert!(!config.directory.exists());
    }
}
