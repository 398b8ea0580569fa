//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Partitioning of simulated hosts into scrape offset buckets."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use hostsim_devops::{Host, Point};
use rand::Rng;
use tracing::debug;

use crate::error::{Result, SimError};

/// Inputs handed to a host factory for one host of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSeed {
    /// Position of the host in `0..host_count`.
    pub index: u32,
    pub seed_a: u64,
    pub seed_b: u64,
    /// Simulation epoch: pool start plus the host's bucket offset.
    pub start: DateTime<Utc>,
}

/// Simulated fleet partitioned by scrape offset second.
#[derive(Debug)]
pub struct HostsSimulator {
    pub(crate) buckets: Vec<Vec<Host>>,
    pub(crate) scrape_interval_seconds: u32,
    pub(crate) host_count: u32,
    pub(crate) point: Point,
}

impl HostsSimulator {
    /// Build a pool of devops hosts.
    ///
    /// Host `j` lands in bucket `j % scrape_interval_seconds` and starts its
    /// simulated clock at `start` plus that offset. Identity seeds and all
    /// measurement state are drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(
        host_count: u32,
        scrape_interval_seconds: u32,
        start: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self> {
        Self::with_factory(host_count, scrape_interval_seconds, start, rng, |seed, rng| {
            Host::new(seed.seed_a, seed.seed_b, seed.start, rng)
        })
    }

    /// Build a pool whose hosts are produced by `factory`.
    pub fn with_factory<R, F>(
        host_count: u32,
        scrape_interval_seconds: u32,
        start: DateTime<Utc>,
        rng: &mut R,
        mut factory: F,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: FnMut(HostSeed, &mut R) -> Host,
    {
        if host_count == 0 {
            return Err(SimError::InvalidHostCount);
        }
        if scrape_interval_seconds == 0 {
            return Err(SimError::InvalidScrapeInterval);
        }

        let per_bucket = (host_count / scrape_interval_seconds + 1) as usize;
        let mut buckets: Vec<Vec<Host>> = (0..scrape_interval_seconds)
            .map(|_| Vec::with_capacity(per_bucket))
            .collect();

        for index in 0..host_count {
            let offset_seconds = index % scrape_interval_seconds;
            let epoch = start
                .checked_add_signed(TimeDelta::seconds(i64::from(offset_seconds)))
                .ok_or(SimError::StartOutOfRange { offset_seconds })?;
            let seed = HostSeed {
                index,
                seed_a: rng.gen(),
                seed_b: rng.gen(),
                start: epoch,
            };
            buckets[offset_seconds as usize].push(factory(seed, rng));
        }

        debug!(
            hosts = host_count,
            scrape_interval_seconds,
            start = %start,
            "host pool constructed"
        );

        Ok(Self {
            buckets,
            scrape_interval_seconds,
            host_count,
            point: Point::new(),
        })
    }

    pub fn scrape_interval_seconds(&self) -> u32 {
        self.scrape_interval_seconds
    }

    pub fn scrape_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.scrape_interval_seconds))
    }

    pub fn host_count(&self) -> u32 {
        self.host_count
    }

    /// Hosts reporting at `offset_seconds`, or `None` outside the interval.
    pub fn bucket(&self, offset_seconds: u32) -> Option<&[Host]> {
        self.buckets
            .get(offset_seconds as usize)
            .map(Vec::as_slice)
    }

    /// Bucket sizes indexed by offset second.
    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }
}
