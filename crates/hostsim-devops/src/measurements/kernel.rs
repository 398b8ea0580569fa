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
use rand::Rng;

use super::{SimulatedMeasurement, WalkState};
use crate::distribution::{RandomWalk, Step};
use crate::point::Point;

const COUNTERS: [&str; 5] = [
    "interrupts",
    "context_switches",
    "processes_forked",
    "disk_pages_in",
    "disk_pages_out",
];

const STEPS: [(f64, f64); 5] = [
    (5.0, 1.0),
    (5.0, 1.0),
    (5.0, 1.0),
    (5.0, 1.0),
    (5.0, 1.0),
];

const MAX_UPTIME_SECS: i64 = 30 * 24 * 3600;

/// Kernel counters plus a boot time fixed at construction.
#[derive(Debug, Clone)]
pub struct KernelMeasurement {
    boot_time: i64,
    state: WalkState,
}

impl KernelMeasurement {
    pub fn new(start: DateTime<Utc>, mut rng: StdRng) -> Self {
        let boot_time = start.timestamp() - rng.gen_range(0..MAX_UPTIME_SECS);
        let walks = STEPS
            .into_iter()
            .map(|pair| RandomWalk::monotonic(Step::from_pair(pair), 0.0))
            .collect();
        Self {
            boot_time,
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for KernelMeasurement {
    fn name(&self) -> &'static str {
        "kernel"
    }

    fn to_point(&self, point: &mut Point) {
        self.state.begin(self.name(), point);
        point.append_field("boot_time", self.boot_time);
        for (index, key) in COUNTERS.into_iter().enumerate() {
            point.append_field(key, self.state.value(index) as i64);
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        self.state.advance(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::FieldValue;
    use chrono::TimeZone;
    use rand::SeedableRng;

    #[test]
    fn boot_time_precedes_start_and_stays_put() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut kernel = KernelMeasurement::new(start, StdRng::seed_from_u64(21));
        let mut point = Point::new();
        kernel.to_point(&mut point);
        let before = point.field_values()[0].clone();
        kernel.tick(Duration::from_secs(60));
        point.reset();
        kernel.to_point(&mut point);
        assert_eq!(point.field_keys()[0], "boot_time");
        assert_eq!(point.field_values()[0], before);
        assert!(matches!(before, FieldValue::Int64(t) if t <= start.timestamp()));
        assert_eq!(point.len(), 6);
    }
}
