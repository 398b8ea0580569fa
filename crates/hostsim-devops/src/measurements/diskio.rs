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
    "reads",
    "writes",
    "read_bytes",
    "write_bytes",
    "read_time",
    "write_time",
    "io_time",
];

const STEPS: [(f64, f64); 7] = [
    (50.0, 10.0),
    (50.0, 10.0),
    (100.0, 20.0),
    (100.0, 20.0),
    (5.0, 1.0),
    (5.0, 1.0),
    (5.0, 1.0),
];

/// Block device counters. All fields are cumulative.
#[derive(Debug, Clone)]
pub struct DiskIoMeasurement {
    state: WalkState,
}

impl DiskIoMeasurement {
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

impl SimulatedMeasurement for DiskIoMeasurement {
    fn name(&self) -> &'static str {
        "diskio"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::FieldValue;
    use rand::SeedableRng;

    fn counters(io: &DiskIoMeasurement) -> Vec<i64> {
        let mut point = Point::new();
        io.to_point(&mut point);
        point
            .field_values()
            .iter()
            .map(|v| match v {
                FieldValue::Int64(v) => *v,
                other => panic!("unexpected kind {}", other.kind()),
            })
            .collect()
    }

    #[test]
    fn counters_start_at_zero_and_grow() {
        let mut io = DiskIoMeasurement::new(DateTime::<Utc>::default(), StdRng::seed_from_u64(4));
        assert!(counters(&io).iter().all(|v| *v == 0));
        io.tick(Duration::from_secs(10));
        io.tick(Duration::from_secs(10));
        let after = counters(&io);
        assert!(after[0] > 0);
        assert!(after.iter().all(|v| *v >= 0));
    }
}
