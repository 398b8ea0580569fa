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

const FIELDS: [&str; 7] = [
    "accepts",
    "active",
    "handled",
    "reading",
    "requests",
    "waiting",
    "writing",
];

/// Nginx stub status. Reported as native integers; cumulative counters
/// saturate at `i32::MAX`.
#[derive(Debug, Clone)]
pub struct NginxMeasurement {
    state: WalkState,
}

impl NginxMeasurement {
    pub fn new(start: DateTime<Utc>, mut rng: StdRng) -> Self {
        let counter = || RandomWalk::monotonic(Step::normal(5.0, 1.0), 0.0);
        let gauge = Step::normal(0.0, 1.0);
        let walks = vec![
            counter(),
            RandomWalk::clamped_from(&mut rng, 0.0, 100.0, gauge),
            counter(),
            RandomWalk::clamped_from(&mut rng, 0.0, 100.0, gauge),
            counter(),
            RandomWalk::clamped_from(&mut rng, 0.0, 100.0, gauge),
            RandomWalk::clamped_from(&mut rng, 0.0, 100.0, gauge),
        ];
        Self {
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for NginxMeasurement {
    fn name(&self) -> &'static str {
        "nginx"
    }

    fn to_point(&self, point: &mut Point) {
        self.state.begin(self.name(), point);
        for (index, key) in FIELDS.into_iter().enumerate() {
            // float to int `as` casts saturate
            point.append_field(key, self.state.value(index) as i32);
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        self.state.advance(elapsed);
    }
}
