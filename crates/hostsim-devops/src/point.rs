//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Point snapshots written by simulated measurements."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// A single field value as written by a measurement.
///
/// Only the numeric kinds can be flattened into samples; `Bool` and `Text`
/// are legal point contents that downstream numeric sinks reject.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Int64(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Short name of the value kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Int64(_) => "int64",
            FieldValue::Float(_) => "float64",
            FieldValue::Bool(_) => "bool",
            FieldValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}i"),
            FieldValue::Int64(v) => write!(f, "{v}i"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

/// Momentary snapshot of one measurement: name, timestamp and parallel
/// field key/value sequences.
///
/// Points are meant to be reused: call [`Point::reset`] before handing one to
/// the next measurement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    measurement_name: &'static str,
    timestamp: DateTime<Utc>,
    field_keys: Vec<&'static str>,
    field_values: Vec<FieldValue>,
}

impl Point {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state while keeping the field buffers allocated.
    pub fn reset(&mut self) {
        self.measurement_name = "";
        self.timestamp = DateTime::<Utc>::default();
        self.field_keys.clear();
        self.field_values.clear();
    }

    pub fn set_measurement_name(&mut self, name: &'static str) {
        self.measurement_name = name;
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    pub fn append_field(&mut self, key: &'static str, value: impl Into<FieldValue>) {
        self.field_keys.push(key);
        self.field_values.push(value.into());
    }

    pub fn measurement_name(&self) -> &'static str {
        self.measurement_name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn field_keys(&self) -> &[&'static str] {
        &self.field_keys
    }

    pub fn field_values(&self) -> &[FieldValue] {
        &self.field_values
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.field_keys
            .iter()
            .copied()
            .zip(self.field_values.iter())
    }

    pub fn len(&self) -> usize {
        self.field_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_keys.is_empty()
    }
}

/// Move an instant forward, saturating at the largest representable time.
pub(crate) fn advance(instant: DateTime<Utc>, elapsed: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(elapsed)
        .ok()
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
