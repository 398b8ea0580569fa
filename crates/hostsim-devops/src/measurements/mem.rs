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
use rand::seq::SliceRandom;

use super::{SimulatedMeasurement, WalkState};
use crate::distribution::{RandomWalk, Step};
use crate::point::Point;

const GIB: i64 = 1024 * 1024 * 1024;
const TOTAL_CHOICES: [i64; 3] = [8 * GIB, 12 * GIB, 16 * GIB];

const USED: usize = 0;
const CACHED: usize = 1;
const BUFFERED: usize = 2;

/// Memory usage. Totals are drawn once per host; usage walks within them.
#[derive(Debug, Clone)]
pub struct MemMeasurement {
    total: i64,
    state: WalkState,
}

impl MemMeasurement {
    pub fn new(start: DateTime<Utc>, mut rng: StdRng) -> Self {
        let total = *TOTAL_CHOICES.choose(&mut rng).unwrap_or(&TOTAL_CHOICES[0]);
        let ceiling = total as f64;
        let step = Step::normal(0.0, ceiling / 1024.0);
        let walks = vec![
            RandomWalk::clamped_from(&mut rng, 0.0, ceiling, step),
            RandomWalk::clamped_from(&mut rng, 0.0, ceiling, step),
            RandomWalk::clamped_from(&mut rng, 0.0, ceiling, step),
        ];
        Self {
            total,
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for MemMeasurement {
    fn name(&self) -> &'static str {
        "mem"
    }

    fn to_point(&self, point: &mut Point) {
        let used = self.state.value(USED) as i64;
        let cached = self.state.value(CACHED) as i64;
        let buffered = self.state.value(BUFFERED) as i64;
        let available = self.total - used;
        let total = self.total as f64;

        self.state.begin(self.name(), point);
        point.append_field("total", self.total);
        point.append_field("available", available);
        point.append_field("used", used);
        point.append_field("free", self.total - used);
        point.append_field("cached", cached);
        point.append_field("buffered", buffered);
        point.append_field("used_percent", 100.0 * used as f64 / total);
        point.append_field("available_percent", 100.0 * available as f64 / total);
        point.append_field("buffered_percent", 100.0 * buffered as f64 / total);
    }

    fn tick(&mut self, elapsed: Duration) {
        self.state.advance(elapsed);
    }
}
