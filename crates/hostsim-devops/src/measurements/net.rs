//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Simulated system measurements attached to every host."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use super::{SimulatedMeasurement, WalkState};
use crate::distribution::{RandomWalk, Step};
use crate::point::Point;

const FIELDS: [&str; 8] = [
    "bytes_sent",
    "bytes_recv",
    "packets_sent",
    "packets_recv",
    "err_in",
    "err_out",
    "drop_in",
    "drop_out",
];

const STEPS: [(f64, f64); 8] = [
    (50_000.0, 10_000.0),
    (50_000.0, 10_000.0),
    (50.0, 10.0),
    (50.0, 10.0),
    (0.0, 0.5),
    (0.0, 0.5),
    (0.0, 0.5),
    (0.0, 0.5),
];

/// Network interface counters. All fields are cumulative.
#[derive(Debug, Clone)]
pub struct NetMeasurement {
    state: WalkState,
}

impl NetMeasurement {
    pub fn new(start: DateTime<Utc>, rng: StdRng) -> Self {
        let walks = STEPS
            .into_iter()
            .map(|pair| RandomWalk::monotonic(Step::from_pair(pair), 0.0))
            .collect();
        Self {
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for NetMeasurement {
    fn name(&self) -> &'static str {
        "net"
    }

    fn to_point(&self, point: &mut Point) {
        self.state.begin(self.name(), point);
        for (index, key) in FIELDS.into_iter().enumerate() {
            point.append_field(key, self.state.value(index) as i64);
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        self.state.advance(elapsed);
    }
}
