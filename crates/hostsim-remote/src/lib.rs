//! ---
//! hostsim_section: "05-wire-formats"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Remote-write wire types for generated time series."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
//! Time series types shaped after the Prometheus remote-write protobuf schema.
//!
//! The messages are hand-declared `prost` structs so the crate needs no
//! `protoc` at build time. Field tags match `prompb/types.proto` and
//! `prompb/remote.proto`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod codec;

pub use codec::{decode_write_request, encode_write_request, write_frame, FrameReader};

/// Reserved label key carrying the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

pub type Result<T> = std::result::Result<T, WireError>;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("snappy error: {0}")]
    Snappy(#[from] snap::Error),
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("frame of {0} bytes exceeds the 4 GiB length prefix")]
    FrameTooLarge(usize),
    #[error("frame announced {expected} bytes but the stream ended after {actual}")]
    TruncatedFrame { expected: usize, actual: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Message, Serialize, Deserialize)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single value at a point in time. `timestamp` is in Unix seconds.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Sample {
    #[prost(double, tag = "1")]
    pub value: f64,
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct TimeSeries {
    #[prost(message, repeated, tag = "1")]
    pub labels: Vec<Label>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    /// Value of the first label named `name`.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.value.as_str())
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.label(METRIC_NAME_LABEL)
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WriteRequest {
    #[prost(message, repeated, tag = "1")]
    pub timeseries: Vec<TimeSeries>,
}
