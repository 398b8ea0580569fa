//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "01-bootstrap"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Series generator CLI driving a simulated host pool."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
//! Generates synthetic host telemetry for ingestion benchmarks.
//!
//! Each scrape interval is walked offset by offset; the series of every offset
//! are written as JSON lines or as length-prefixed remote-write requests.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hostsim_common::time::{now_seconds, parse_start, truncate_to_seconds};
use hostsim_common::{init_tracing, GeneratorConfig, OutputConfig, OutputFormat, TickReport};
use hostsim_sim::HostsSimulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

mod sink;

use sink::SeriesSink;

const DEFAULT_CONFIG: &str = "hostsim.toml";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    JsonLines,
    RemoteWrite,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::JsonLines => OutputFormat::JsonLines,
            FormatArg::RemoteWrite => OutputFormat::RemoteWrite,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate synthetic host telemetry as labeled time series",
    long_about = None
)]
struct Cli {
    /// Configuration file. Defaults to $HOSTSIM_CONFIG, then ./hostsim.toml when present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of simulated hosts
    #[arg(long)]
    hosts: Option<u32>,

    /// Scrape interval in seconds; hosts are spread over its offsets
    #[arg(long)]
    scrape_interval: Option<u32>,

    /// Simulation start as RFC 3339 (defaults to now)
    #[arg(long)]
    start: Option<String>,

    /// Random seed for host identities and measurements
    #[arg(long)]
    seed: Option<u64>,

    /// Number of full scrape intervals to generate
    #[arg(long)]
    intervals: Option<u32>,

    /// Output file path. Use '-' for stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Write a JSON timing summary to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_tracing("hostsim-gen", &config.logging)?;

    let report = TickReport::new();
    let written = run(&config, &report)?;

    if let Some(summary) = report.summary() {
        info!(
            ticks = summary.ticks,
            series = written,
            mean_us = summary.mean_us,
            max_us = summary.max_us,
            "generation finished"
        );
    }
    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None if std::env::var_os(GeneratorConfig::ENV_CONFIG_PATH).is_some()
            || Path::new(DEFAULT_CONFIG).exists() =>
        {
            GeneratorConfig::load(&[DEFAULT_CONFIG])?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(hosts) = cli.hosts {
        config.hosts.count = hosts;
    }
    if let Some(interval) = cli.scrape_interval {
        config.hosts.scrape_interval = std::time::Duration::from_secs(u64::from(interval));
    }
    if let Some(start) = &cli.start {
        config.hosts.start = Some(parse_start(start)?);
    }
    if let Some(seed) = cli.seed {
        config.hosts.seed = Some(seed);
    }
    if let Some(intervals) = cli.intervals {
        config.output.intervals = intervals;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }

    config.validate()?;
    Ok(config)
}

/// Walk every offset of `config.output.intervals` scrape intervals and write
/// the generated series. Returns the number of series written.
fn run(config: &GeneratorConfig, report: &TickReport) -> Result<u64> {
    let mut rng = match config.hosts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let start = config
        .hosts
        .start
        .map(truncate_to_seconds)
        .unwrap_or_else(now_seconds);
    let interval = config.hosts.scrape_interval_seconds();

    let mut simulator = HostsSimulator::new(config.hosts.count, interval, start, &mut rng)
        .context("unable to build host pool")?;
    info!(
        hosts = config.hosts.count,
        scrape_interval_seconds = interval,
        intervals = config.output.intervals,
        start = %start,
        format = ?config.output.format,
        "starting generation"
    );

    let mut sink = SeriesSink::new(config.output.format, open_output(&config.output)?);
    for cycle in 0..config.output.intervals {
        for offset in 0..interval {
            let began = Instant::now();
            let series = simulator
                .generate(offset)
                .with_context(|| format!("generation aborted in interval {cycle} at offset {offset}s"))?
                .unwrap_or_default();
            report.record(began.elapsed(), series.len());
            sink.write_tick(series)?;
        }
    }

    let written = sink.written();
    sink.finish()?;
    Ok(written)
}

fn open_output(output: &OutputConfig) -> Result<Box<dyn Write>> {
    if output.is_stdout() {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(&output.path)
        .with_context(|| format!("failed to create output file {}", output.path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsim_remote::{decode_write_request, FrameReader, TimeSeries};
    use std::io::BufRead;

    /// Series a standard devops host emits per tick.
    const SERIES_PER_HOST: u64 = 10 + 7 + 7 + 6 + 9 + 8 + 7;

    fn base_cli() -> Cli {
        Cli {
            config: None,
            hosts: Some(4),
            scrape_interval: Some(2),
            start: Some("2024-01-01T00:00:00Z".into()),
            seed: Some(7),
            intervals: Some(2),
            output: Some(PathBuf::from("-")),
            format: None,
            report: None,
        }
    }

    fn config_writing_to(path: &Path, format: FormatArg) -> GeneratorConfig {
        let mut cli = base_cli();
        cli.output = Some(path.to_path_buf());
        cli.format = Some(format);
        resolve_config(&cli).unwrap()
    }

    #[test]
    fn cli_overrides_defaults() {
        let config = resolve_config(&base_cli()).unwrap();
        assert_eq!(config.hosts.count, 4);
        assert_eq!(config.hosts.scrape_interval_seconds(), 2);
        assert_eq!(config.hosts.seed, Some(7));
        assert_eq!(config.output.intervals, 2);
        assert_eq!(config.output.format, OutputFormat::JsonLines);
    }

    #[test]
    fn cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostsim.toml");
        std::fs::write(&path, "[hosts]\ncount = 50\nseed = 1\n[output]\nformat = \"remote-write\"\n").unwrap();
        let mut cli = base_cli();
        cli.config = Some(path);
        cli.seed = None;
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.hosts.count, 4);
        assert_eq!(config.hosts.seed, Some(1));
        assert_eq!(config.output.format, OutputFormat::RemoteWrite);
    }

    #[test]
    fn zero_scrape_interval_is_rejected() {
        let mut cli = base_cli();
        cli.scrape_interval = Some(0);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn bad_start_is_rejected() {
        let mut cli = base_cli();
        cli.start = Some("noon".into());
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn json_lines_run_writes_every_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.jsonl");
        let config = config_writing_to(&path, FormatArg::JsonLines);
        let report = TickReport::new();

        let written = run(&config, &report).unwrap();
        assert_eq!(written, 4 * 2 * SERIES_PER_HOST);

        let file = std::io::BufReader::new(File::open(&path).unwrap());
        let mut lines = 0;
        for line in file.lines() {
            let series: TimeSeries = serde_json::from_str(&line.unwrap()).unwrap();
            assert_eq!(series.labels.len(), hostsim_sim::LABELS_PER_SERIES);
            lines += 1;
        }
        assert_eq!(lines, written);

        let summary = report.summary().unwrap();
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.series, written);
    }

    #[test]
    fn remote_write_run_writes_one_frame_per_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.bin");
        let config = config_writing_to(&path, FormatArg::RemoteWrite);
        run(&config, &TickReport::new()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let frames: Vec<_> = FrameReader::new(bytes.as_slice())
            .map(|frame| decode_write_request(&frame.unwrap()).unwrap())
            .collect();
        assert_eq!(frames.len(), 4);
        let start = 1_704_067_200;
        let first_timestamps: Vec<i64> = frames
            .iter()
            .map(|request| request.timeseries[0].samples[0].timestamp)
            .collect();
        assert_eq!(first_timestamps, vec![start, start + 1, start + 2, start + 3]);
    }

    #[test]
    fn same_seed_same_output() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        run(&config_writing_to(&a, FormatArg::JsonLines), &TickReport::new()).unwrap();
        run(&config_writing_to(&b, FormatArg::JsonLines), &TickReport::new()).unwrap();
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }
}
