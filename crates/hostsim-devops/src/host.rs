//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Simulated host identities and their measurement sets."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::measurements::{standard_measurements, SimulatedMeasurement};

/// Tag keys describing a host, in label order.
pub const MACHINE_TAG_KEYS: [&str; 10] = [
    "hostname",
    "region",
    "datacenter",
    "rack",
    "os",
    "arch",
    "team",
    "service",
    "service_version",
    "service_environment",
];

const RACK_CHOICES_PER_DATACENTER: u32 = 100;
const SERVICE_CHOICES: u32 = 20;
const SERVICE_VERSION_CHOICES: u32 = 2;

const OS_CHOICES: [&str; 3] = ["Ubuntu16.10", "Ubuntu16.04LTS", "Ubuntu15.10"];
const ARCH_CHOICES: [&str; 2] = ["x64", "x86"];
const TEAM_CHOICES: [&str; 4] = ["SF", "NYC", "LON", "CHI"];
const ENVIRONMENT_CHOICES: [&str; 3] = ["production", "staging", "test"];

/// Cloud region together with its availability zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub datacenters: &'static [&'static str],
}

pub static REGIONS: [Region; 9] = [
    Region {
        name: "us-east-1",
        datacenters: &["us-east-1a", "us-east-1b", "us-east-1c", "us-east-1e"],
    },
    Region {
        name: "us-west-1",
        datacenters: &["us-west-1a", "us-west-1b"],
    },
    Region {
        name: "us-west-2",
        datacenters: &["us-west-2a", "us-west-2b", "us-west-2c"],
    },
    Region {
        name: "eu-west-1",
        datacenters: &["eu-west-1a", "eu-west-1b", "eu-west-1c"],
    },
    Region {
        name: "eu-central-1",
        datacenters: &["eu-central-1a", "eu-central-1b"],
    },
    Region {
        name: "ap-southeast-1",
        datacenters: &["ap-southeast-1a", "ap-southeast-1b"],
    },
    Region {
        name: "ap-southeast-2",
        datacenters: &["ap-southeast-2a", "ap-southeast-2b"],
    },
    Region {
        name: "ap-northeast-1",
        datacenters: &["ap-northeast-1a", "ap-northeast-1c"],
    },
    Region {
        name: "sa-east-1",
        datacenters: &["sa-east-1a", "sa-east-1b", "sa-east-1c"],
    },
];

/// Descriptive tag dimensions of a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub name: String,
    pub region: String,
    pub datacenter: String,
    pub rack: String,
    pub os: String,
    pub arch: String,
    pub team: String,
    pub service: String,
    pub service_version: String,
    pub service_environment: String,
}

impl HostIdentity {
    /// Draw a random identity. The host name is derived from the two seeds,
    /// so distinct hosts may collide when their seeds sum to the same value.
    pub fn random<R: Rng + ?Sized>(seed_a: u64, seed_b: u64, rng: &mut R) -> Self {
        let region = pick(&REGIONS, rng);
        Self {
            name: format!("host_{}", seed_a.wrapping_add(seed_b)),
            region: region.name.to_owned(),
            datacenter: pick(region.datacenters, rng).to_string(),
            rack: rng.gen_range(0..RACK_CHOICES_PER_DATACENTER).to_string(),
            os: pick(&OS_CHOICES, rng).to_string(),
            arch: pick(&ARCH_CHOICES, rng).to_string(),
            team: pick(&TEAM_CHOICES, rng).to_string(),
            service: rng.gen_range(0..SERVICE_CHOICES).to_string(),
            service_version: rng.gen_range(0..SERVICE_VERSION_CHOICES).to_string(),
            service_environment: pick(&ENVIRONMENT_CHOICES, rng).to_string(),
        }
    }

    /// Tag pairs keyed by [`MACHINE_TAG_KEYS`], in the same order.
    pub fn tags(&self) -> [(&'static str, &str); 10] {
        [
            (MACHINE_TAG_KEYS[0], self.name.as_str()),
            (MACHINE_TAG_KEYS[1], self.region.as_str()),
            (MACHINE_TAG_KEYS[2], self.datacenter.as_str()),
            (MACHINE_TAG_KEYS[3], self.rack.as_str()),
            (MACHINE_TAG_KEYS[4], self.os.as_str()),
            (MACHINE_TAG_KEYS[5], self.arch.as_str()),
            (MACHINE_TAG_KEYS[6], self.team.as_str()),
            (MACHINE_TAG_KEYS[7], self.service.as_str()),
            (MACHINE_TAG_KEYS[8], self.service_version.as_str()),
            (MACHINE_TAG_KEYS[9], self.service_environment.as_str()),
        ]
    }
}

fn pick<'a, T, R: Rng + ?Sized>(choices: &'a [T], rng: &mut R) -> &'a T {
    // every choice table is a non-empty constant
    &choices[rng.gen_range(0..choices.len())]
}

/// A simulated machine: identity tags plus the measurements it reports.
#[derive(Debug)]
pub struct Host {
    identity: HostIdentity,
    measurements: Vec<Box<dyn SimulatedMeasurement>>,
}

impl Host {
    /// Build a devops host whose measurements start at `start`.
    pub fn new<R: Rng + ?Sized>(
        seed_a: u64,
        seed_b: u64,
        start: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let identity = HostIdentity::random(seed_a, seed_b, rng);
        let measurements = standard_measurements(start, rng);
        Self::with_measurements(identity, measurements)
    }

    pub fn with_measurements(
        identity: HostIdentity,
        measurements: Vec<Box<dyn SimulatedMeasurement>>,
    ) -> Self {
        Self {
            identity,
            measurements,
        }
    }

    pub fn identity(&self) -> &HostIdentity {
        &self.identity
    }

    pub fn measurements(&self) -> &[Box<dyn SimulatedMeasurement>] {
        &self.measurements
    }

    /// Advance every measurement by `elapsed`.
    pub fn tick_all(&mut self, elapsed: Duration) {
        for measurement in &mut self.measurements {
            measurement.tick(elapsed);
        }
    }
}
