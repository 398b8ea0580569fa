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

const MIB: f64 = 1024.0 * 1024.0;
const TOTAL_BYTES: i64 = 1 << 40;
const TOTAL_INODES: i64 = 64 * 1024 * 1024;

const USED: usize = 0;
const INODES_USED: usize = 1;

/// Filesystem usage of a single 1 TiB root volume.
#[derive(Debug, Clone)]
pub struct DiskMeasurement {
    state: WalkState,
}

impl DiskMeasurement {
    pub fn new(start: DateTime<Utc>, mut rng: StdRng) -> Self {
        let walks = vec![
            RandomWalk::clamped_from(
                &mut rng,
                0.0,
                TOTAL_BYTES as f64,
                Step::normal(0.0, 512.0 * MIB),
            ),
            RandomWalk::clamped_from(
                &mut rng,
                0.0,
                TOTAL_INODES as f64,
                Step::normal(0.0, 1_000.0),
            ),
        ];
        Self {
            state: WalkState::new(start, rng).with_walks(walks),
        }
    }
}

impl SimulatedMeasurement for DiskMeasurement {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn to_point(&self, point: &mut Point) {
        let used = self.state.value(USED) as i64;
        let inodes_used = self.state.value(INODES_USED) as i64;
        self.state.begin(self.name(), point);
        point.append_field("total", TOTAL_BYTES);
        point.append_field("free", TOTAL_BYTES - used);
        point.append_field("used", used);
        point.append_field("used_percent", 100.0 * used as f64 / TOTAL_BYTES as f64);
        point.append_field("inodes_total", TOTAL_INODES);
        point.append_field("inodes_free", TOTAL_INODES - inodes_used);
        point.append_field("inodes_used", inodes_used);
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
    fn used_and_free_sum_to_total() {
        let mut disk = DiskMeasurement::new(DateTime::<Utc>::default(), StdRng::seed_from_u64(8));
        disk.tick(Duration::from_secs(30));
        let mut point = Point::new();
        disk.to_point(&mut point);
        let value = |key: &str| {
            point
                .fields()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        let (FieldValue::Int64(free), FieldValue::Int64(used)) = (value("free"), value("used"))
        else {
            panic!("disk byte fields must be int64");
        };
        assert_eq!(free + used, TOTAL_BYTES);
        assert!(matches!(value("used_percent"), FieldValue::Float(p) if (0.0..=100.0).contains(&p)));
    }
}
