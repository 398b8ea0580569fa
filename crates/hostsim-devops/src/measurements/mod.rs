//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Simulated system measurements attached to every host."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distribution::RandomWalk;
use crate::point::{advance, Point};

mod cpu;
mod disk;
mod diskio;
mod kernel;
mod mem;
mod net;
mod nginx;

pub use cpu::CpuMeasurement;
pub use disk::DiskMeasurement;
pub use diskio::DiskIoMeasurement;
pub use kernel::KernelMeasurement;
pub use mem::MemMeasurement;
pub use net::NetMeasurement;
pub use nginx::NginxMeasurement;

/// A named metric source owned by a host.
pub trait SimulatedMeasurement: fmt::Debug + Send {
    /// Measurement name written into every point.
    fn name(&self) -> &'static str;

    /// Write the current field state, name and timestamp into `point`.
    ///
    /// Implementations append to the point; callers reset it beforehand.
    fn to_point(&self, point: &mut Point);

    /// Advance simulated time and field state by `elapsed`.
    fn tick(&mut self, elapsed: Duration);
}

/// Build the full measurement set a simulated devops host reports.
///
/// Every measurement receives its own generator seeded from `rng`, so a host
/// built from a seeded source replays identically.
pub fn standard_measurements<R: Rng + ?Sized>(
    start: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Box<dyn SimulatedMeasurement>> {
    vec![
        Box::new(CpuMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(DiskIoMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(DiskMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(KernelMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(MemMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(NetMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
        Box::new(NginxMeasurement::new(start, fork(rng))) as Box<dyn SimulatedMeasurement>,
    ]
}

fn fork<R: Rng + ?Sized>(rng: &mut R) -> StdRng {
    StdRng::seed_from_u64(rng.gen())
}

/// Clock, generator and walks shared by every measurement implementation.
#[derive(Debug, Clone)]
pub(crate) struct WalkState {
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) rng: StdRng,
    pub(crate) walks: Vec<RandomWalk>,
}

impl WalkState {
    pub(crate) fn new(timestamp: DateTime<Utc>, rng: StdRng) -> Self {
        Self {
            timestamp,
            rng,
            walks: Vec::new(),
        }
    }

    pub(crate) fn with_walks(mut self, walks: Vec<RandomWalk>) -> Self {
        self.walks = walks;
        self
    }

    pub(crate) fn advance(&mut self, elapsed: Duration) {
        self.timestamp = advance(self.timestamp, elapsed);
        for walk in &mut self.walks {
            walk.advance(&mut self.rng);
        }
    }

    pub(crate) fn value(&self, index: usize) -> f64 {
        self.walks[index].get()
    }

    pub(crate) fn begin(&self, name: &'static str, point: &mut Point) {
        point.set_measurement_name(name);
        point.set_timestamp(self.timestamp);
    }
}
