//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Error taxonomy of the host pool simulator."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("host count must be greater than zero")]
    InvalidHostCount,
    #[error("scrape interval must be at least one second")]
    InvalidScrapeInterval,
    #[error("start time plus offset {offset_seconds}s is out of range")]
    StartOutOfRange { offset_seconds: u32 },
    /// A measurement wrote a field that cannot be expressed as a sample value.
    #[error("cannot convert field {field} of measurement {measurement} with value type: {kind}")]
    UnsupportedFieldValue {
        measurement: String,
        field: String,
        kind: &'static str,
    },
}
