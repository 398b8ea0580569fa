//! ---
//! hostsim_section: "01-core-functionality"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Shared primitives and utilities for the generator runtime."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::time::duration_to_micros;

#[derive(Debug, Clone, Copy)]
struct TickRecord {
    elapsed_us: f64,
    series: u64,
}

/// Collects per-tick generation cost so a run can be summarised afterwards.
#[derive(Debug, Default)]
pub struct TickReport {
    records: Mutex<Vec<TickRecord>>,
}

impl TickReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, elapsed: Duration, series: usize) {
        self.records.lock().push(TickRecord {
            elapsed_us: duration_to_micros(elapsed) as f64,
            series: series as u64,
        });
    }

    pub fn summary(&self) -> Option<TickSummary> {
        let records = self.records.lock();
        let slice = records.as_slice();
        if slice.is_empty() {
            return None;
        }
        let count = slice.len() as f64;
        let mean = slice.iter().map(|r| r.elapsed_us).sum::<f64>() / count;
        let variance = if slice.len() > 1 {
            let sum_sq = slice
                .iter()
                .map(|r| {
                    let delta = r.elapsed_us - mean;
                    delta * delta
                })
                .sum::<f64>();
            sum_sq / (count - 1.0)
        } else {
            0.0
        };
        let max = slice.iter().map(|r| r.elapsed_us).fold(f64::MIN, f64::max);
        let min = slice.iter().map(|r| r.elapsed_us).fold(f64::MAX, f64::min);
        Some(TickSummary {
            ticks: slice.len() as u64,
            series: slice.iter().map(|r| r.series).sum(),
            mean_us: mean,
            std_dev_us: variance.sqrt(),
            max_us: max,
            min_us: min,
        })
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        if let Some(summary) = self.summary() {
            let mut file = File::create(path)?;
            let json = serde_json::to_vec_pretty(&summary)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
            file.write_all(&json)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickSummary {
    pub ticks: u64,
    pub series: u64,
    pub mean_us: f64,
    pub std_dev_us: f64,
    pub max_us: f64,
    pub min_us: f64,
}
