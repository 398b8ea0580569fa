//! ---
//! hostsim_section: "01-core-functionality"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Shared primitives and utilities for the generator runtime."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_host_count() -> u32 {
    100
}

fn default_scrape_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_output_path() -> PathBuf {
    PathBuf::from("-")
}

fn default_intervals() -> u32 {
    1
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

/// Primary configuration object for a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub hosts: HostsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`GeneratorConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedGeneratorConfig {
    pub config: GeneratorConfig,
    pub source: PathBuf,
}

impl GeneratorConfig {
    pub const ENV_CONFIG_PATH: &'static str = "HOSTSIM_CONFIG";

    /// Load configuration from disk, respecting the `HOSTSIM_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedGeneratorConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedGeneratorConfig {
                    config,
                    source: path,
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedGeneratorConfig {
                    config,
                    source: path,
                });
            }
        }

        Err(anyhow!(
            "no configuration files found. inspected: {}",
            candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<GeneratorConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.hosts.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for GeneratorConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: GeneratorConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Shape of the simulated fleet.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsConfig {
    #[serde(default = "default_host_count")]
    pub count: u32,
    #[serde(default = "default_scrape_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub scrape_interval: Duration,
    /// Simulation epoch. Defaults to the wall clock at startup.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Seed for host identities and measurement state. Entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            count: default_host_count(),
            scrape_interval: default_scrape_interval(),
            start: None,
            seed: None,
        }
    }
}

impl HostsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(anyhow!("hosts.count must be greater than zero"));
        }
        if self.scrape_interval.subsec_nanos() != 0 {
            return Err(anyhow!("hosts.scrape_interval must be a whole number of seconds"));
        }
        if self.scrape_interval.as_secs() == 0 {
            return Err(anyhow!("hosts.scrape_interval must be at least one second"));
        }
        if u32::try_from(self.scrape_interval.as_secs()).is_err() {
            return Err(anyhow!(
                "hosts.scrape_interval of {}s is out of range",
                self.scrape_interval.as_secs()
            ));
        }
        Ok(())
    }

    /// Scrape interval in whole seconds. Only meaningful after [`Self::validate`].
    pub fn scrape_interval_seconds(&self) -> u32 {
        u32::try_from(self.scrape_interval.as_secs()).unwrap_or(u32::MAX)
    }
}

/// Serialisation format of generated series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One JSON encoded time series per line.
    #[default]
    JsonLines,
    /// Length-prefixed, snappy compressed remote-write requests, one per tick.
    RemoteWrite,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json-lines" | "jsonl" => Ok(OutputFormat::JsonLines),
            "remote-write" => Ok(OutputFormat::RemoteWrite),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file. `-` selects stdout.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    /// Number of full scrape intervals to generate.
    #[serde(default = "default_intervals")]
    pub intervals: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
            intervals: default_intervals(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.intervals == 0 {
            return Err(anyhow!("output.intervals must be greater than zero"));
        }
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("output.path must not be empty"));
        }
        Ok(())
    }

    pub fn is_stdout(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub format: LogFormat,
    /// Keep a daily rolling JSON log under `directory` next to console output.
    #[serde(default)]
    pub file: bool,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: LogFormat::default(),
            file: false,
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_document_uses_defaults() {
        let config: GeneratorConfig = "".parse().unwrap();
        assert_eq!(config.hosts.count, 100);
        assert_eq!(config.hosts.scrape_interval_seconds(), 10);
        assert!(config.hosts.start.is_none());
        assert!(config.output.is_stdout());
        assert_eq!(config.output.format, OutputFormat::JsonLines);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parses_full_document() {
        let config: GeneratorConfig = r#"
            [hosts]
            count = 4
            scrape_interval = 2
            start = "2024-01-01T00:00:00Z"
            seed = 7

            [output]
            path = "series.bin"
            format = "remote-write"
            intervals = 3
        "#
        .parse()
        .unwrap();
        assert_eq!(config.hosts.count, 4);
        assert_eq!(config.hosts.scrape_interval, Duration::from_secs(2));
        assert_eq!(config.hosts.seed, Some(7));
        assert_eq!(
            config.hosts.start.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(config.output.format, OutputFormat::RemoteWrite);
        assert_eq!(config.output.intervals, 3);
        assert!(!config.output.is_stdout());
    }

    #[test]
    fn rejects_zero_hosts() {
        let err = "[hosts]\ncount = 0".parse::<GeneratorConfig>().unwrap_err();
        assert!(err.to_string().contains("hosts.count"));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = "[hosts]\nscrape_interval = 0"
            .parse::<GeneratorConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("scrape_interval"));
    }

    #[test]
    fn rejects_zero_intervals() {
        assert!("[output]\nintervals = 0".parse::<GeneratorConfig>().is_err());
    }

    #[test]
    fn load_with_source_picks_first_existing_candidate() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[hosts]\ncount = 12").unwrap();
        let missing = PathBuf::from("does/not/exist.toml");
        let loaded =
            GeneratorConfig::load_with_source(&[missing, file.path().to_path_buf()]).unwrap();
        assert_eq!(loaded.config.hosts.count, 12);
        assert_eq!(loaded.source, file.path());
    }

    #[test]
    fn load_reports_inspected_candidates() {
        let err = GeneratorConfig::load(&["nowhere.toml"]).unwrap_err();
        assert!(err.to_string().contains("nowhere.toml"));
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("jsonl".parse::<OutputFormat>(), Ok(OutputFormat::JsonLines));
        assert_eq!(
            "Remote-Write".parse::<OutputFormat>(),
            Ok(OutputFormat::RemoteWrite)
        );
        assert!("parquet".parse::<OutputFormat>().is_err());
    }
}
