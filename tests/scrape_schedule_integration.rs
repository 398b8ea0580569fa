//! ---
//! hostsim_section: "15-testing-qa-runbook"
//! hostsim_subsection: "integration-tests"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Integration and validation tests for the hostsim stack."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use hostsim_devops::{Point, MACHINE_TAG_KEYS};
use hostsim_remote::{decode_write_request, encode_write_request, WriteRequest, METRIC_NAME_LABEL};
use hostsim_sim::{HostsSimulator, LABELS_PER_SERIES, MEASUREMENT_LABEL};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn hostnames(series: &[hostsim_remote::TimeSeries]) -> HashSet<String> {
    series
        .iter()
        .filter_map(|s| s.label("hostname").map(str::to_owned))
        .collect()
}

#[test]
fn four_hosts_over_two_seconds() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut pool = HostsSimulator::new(4, 2, t0(), &mut rng).unwrap();

    let bucket_names = |pool: &HostsSimulator, offset| -> HashSet<String> {
        pool.bucket(offset)
            .unwrap()
            .iter()
            .map(|h| h.identity().name.clone())
            .collect()
    };
    let even = bucket_names(&pool, 0);
    let odd = bucket_names(&pool, 1);
    assert_eq!(pool.bucket_sizes(), vec![2, 2]);

    let at_zero = pool.generate(0).unwrap().unwrap();
    assert_eq!(hostnames(&at_zero), even);
    assert!(at_zero.iter().all(|s| s.samples[0].timestamp == t0().timestamp()));

    let at_one = pool.generate(1).unwrap().unwrap();
    assert_eq!(hostnames(&at_one), odd);
    assert!(at_one.iter().all(|s| s.samples[0].timestamp == t0().timestamp() + 1));

    assert!(pool.generate(2).unwrap().is_none());
}

#[test]
fn full_cycle_covers_every_host_once() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut pool = HostsSimulator::new(25, 10, t0(), &mut rng).unwrap();
    let all: HashSet<String> = (0..10)
        .flat_map(|offset| pool.bucket(offset).unwrap().iter().map(|h| h.identity().name.clone()))
        .collect();

    let mut seen = HashSet::new();
    for offset in 0..10 {
        let series = pool.generate(offset).unwrap().unwrap();
        for name in hostnames(&series) {
            assert!(seen.insert(name), "host reported twice in one interval");
        }
    }
    assert_eq!(seen, all);
}

#[test]
fn every_series_has_the_fixed_label_layout() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut pool = HostsSimulator::new(3, 1, t0(), &mut rng).unwrap();

    let mut point = Point::new();
    let expected: usize = pool
        .bucket(0)
        .unwrap()
        .iter()
        .flat_map(|host| host.measurements())
        .map(|m| {
            point.reset();
            m.to_point(&mut point);
            point.len()
        })
        .sum();

    let series = pool.generate(0).unwrap().unwrap();
    assert_eq!(series.len(), expected);
    for entry in &series {
        assert_eq!(entry.labels.len(), LABELS_PER_SERIES);
        for (label, key) in entry.labels.iter().zip(MACHINE_TAG_KEYS) {
            assert_eq!(label.name, key);
        }
        assert_eq!(entry.labels[10].name, MEASUREMENT_LABEL);
        assert_eq!(entry.labels[11].name, METRIC_NAME_LABEL);
        assert_eq!(entry.samples.len(), 1);
    }
    let metrics: HashSet<_> = series.iter().filter_map(|s| s.metric_name()).collect();
    assert_eq!(
        metrics,
        HashSet::from(["cpu", "diskio", "disk", "kernel", "mem", "net", "nginx"])
    );
}

#[test]
fn second_tick_at_same_offset_differs() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut pool = HostsSimulator::new(2, 1, t0(), &mut rng).unwrap();
    let first = pool.generate(0).unwrap().unwrap();
    let second = pool.generate(0).unwrap().unwrap();
    let values = |series: &[hostsim_remote::TimeSeries]| -> Vec<f64> {
        series.iter().map(|s| s.samples[0].value).collect()
    };
    assert_ne!(values(&first), values(&second));
    assert_eq!(
        second[0].samples[0].timestamp - first[0].samples[0].timestamp,
        1
    );
}

#[test]
fn generated_tick_survives_the_wire() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut pool = HostsSimulator::new(8, 4, t0(), &mut rng).unwrap();
    let series = pool.generate(3).unwrap().unwrap();
    let request = WriteRequest { timeseries: series };
    let body = encode_write_request(&request).unwrap();
    assert_eq!(decode_write_request(&body).unwrap(), request);
}
