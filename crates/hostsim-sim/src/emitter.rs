//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Per-offset flattening of host measurements into labeled samples."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use hostsim_devops::{FieldValue, Host, Point, MACHINE_TAG_KEYS};
use hostsim_remote::{Label, Sample, TimeSeries, METRIC_NAME_LABEL};
use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::pool::HostsSimulator;

/// Label key holding the field name of a series.
pub const MEASUREMENT_LABEL: &str = "measurement";

/// Host tags, then the field label, then the metric name.
pub const LABELS_PER_SERIES: usize = MACHINE_TAG_KEYS.len() + 2;

const SERIES_PER_HOST_HINT: usize = 64;

impl HostsSimulator {
    /// Flatten the measurements of every host scheduled at `offset_seconds`
    /// into one single-sample series per field, then advance those hosts by
    /// one scrape interval.
    ///
    /// Returns `Ok(None)` when the offset lies outside the scrape interval and
    /// `Ok(Some(vec![]))` for an allocated but empty bucket. The call mutates
    /// host state: a second call for the same offset yields the next interval's
    /// values.
    ///
    /// On [`SimError::UnsupportedFieldValue`] the hosts before the offending
    /// one have already been advanced; the run should be abandoned.
    pub fn generate(&mut self, offset_seconds: u32) -> Result<Option<Vec<TimeSeries>>> {
        let elapsed = self.scrape_interval();
        let Some(hosts) = self.buckets.get_mut(offset_seconds as usize) else {
            return Ok(None);
        };
        let point = &mut self.point;

        let mut series = Vec::with_capacity(hosts.len() * SERIES_PER_HOST_HINT);
        for host in hosts.iter_mut() {
            flatten_host(host, point, &mut series)?;
            host.tick_all(elapsed);
        }

        debug!(
            offset_seconds,
            hosts = hosts.len(),
            series = series.len(),
            "generated scrape offset"
        );
        Ok(Some(series))
    }
}

fn flatten_host(host: &Host, point: &mut Point, out: &mut Vec<TimeSeries>) -> Result<()> {
    let tags = host.identity().tags();
    for measurement in host.measurements() {
        point.reset();
        measurement.to_point(point);

        let name = point.measurement_name();
        let timestamp = point.timestamp().timestamp();
        for (field, value) in point.fields() {
            let value = sample_value(name, field, value)?;

            let mut labels = Vec::with_capacity(LABELS_PER_SERIES);
            labels.extend(tags.iter().map(|(key, tag)| Label::new(*key, *tag)));
            labels.push(Label::new(MEASUREMENT_LABEL, field));
            labels.push(Label::new(METRIC_NAME_LABEL, name));

            out.push(TimeSeries {
                labels,
                samples: vec![Sample { value, timestamp }],
            });
        }
    }
    Ok(())
}

/// Coerce a numeric field into a sample value.
pub fn sample_value(measurement: &str, field: &str, value: &FieldValue) -> Result<f64> {
    match value {
        FieldValue::Int(v) => Ok(f64::from(*v)),
        FieldValue::Int64(v) => Ok(*v as f64),
        FieldValue::Float(v) => Ok(*v),
        FieldValue::Bool(_) | FieldValue::Text(_) => {
            warn!(measurement, field, kind = value.kind(), "unsupported field value");
            Err(SimError::UnsupportedFieldValue {
                measurement: measurement.to_owned(),
                field: field.to_owned(),
                kind: value.kind(),
            })
        }
    }
}
