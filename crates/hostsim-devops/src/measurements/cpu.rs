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

const FIELDS: [&str; 10] = [
    "usage_user",
    "usage_system",
    "usage_idle",
    "usage_nice",
    "usage_iowait",
    "usage_irq",
    "usage_softirq",
    "usage_steal",
    "usage_guest",
    "usage_guest_nice",
];

/// CPU utilisation percentages, each an independent walk over `0..=100`.
#[derive(Debug, Clone)]
pub struct CpuMeasurement {
    state: WalkState,
}

impl CpuMeasurement {
    pub fn new(start: DateTime<Utc>, mut rng: StdRng) -> Self {
        let walks = FIELDS
            .iter()
            .map(|_| RandomWalk::clamped_from(&mut rng, 0.0, 100.0, Step::normal(0.0, 1.0)))
            .collect();
        Self {
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for CpuMeasurement {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn to_point(&self, point: &mut Point) {
        self.state.begin(self.name(), point);
        for (index, key) in FIELDS.into_iter().enumerate() {
            point.append_field(key, self.state.value(index));
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

    #[test]
    fn writes_ten_float_percentages() {
        let cpu = CpuMeasurement::new(DateTime::<Utc>::default(), StdRng::seed_from_u64(1));
        let mut point = Point::new();
        cpu.to_point(&mut point);
        assert_eq!(point.len(), 10);
        assert_eq!(point.field_keys()[0], "usage_user");
        for value in point.field_values() {
            match value {
                FieldValue::Float(v) => assert!((0.0..=100.0).contains(v)),
                other => panic!("unexpected kind {}", other.kind()),
            }
        }
    }
}
