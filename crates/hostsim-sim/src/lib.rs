//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "01-bootstrap"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Host pool simulator module exports and shared types."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
//! Host pool simulation for ingestion benchmarks.
//!
//! [`HostsSimulator`] spreads a fleet of simulated hosts across the seconds of
//! a scrape interval. Calling [`HostsSimulator::generate`] once per offset
//! second yields that bucket's measurements as labeled time series and moves
//! the bucket's hosts one scrape interval forward.
//!
//! The simulator owns every host. `generate` takes `&mut self`, so a pool can
//! only be ticked from one place at a time; parallel generation needs one
//! pool per worker.

mod emitter;
mod error;
mod pool;

pub use emitter::{sample_value, LABELS_PER_SERIES, MEASUREMENT_LABEL};
pub use error::{Result, SimError};
pub use pool::{HostSeed, HostsSimulator};
