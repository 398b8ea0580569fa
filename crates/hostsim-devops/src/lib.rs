//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "01-bootstrap"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Devops host simulation module exports and shared types."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
//! Simulated devops hosts for the hostsim generator.
//!
//! A [`Host`] carries a fixed set of identity tags and a list of
//! [`SimulatedMeasurement`]s. Measurements write their current state into a
//! caller supplied [`Point`] and move forward in simulated time when ticked.

pub mod distribution;
pub mod host;
pub mod measurements;
pub mod point;

pub use distribution::{RandomWalk, Step};
pub use host::{Host, HostIdentity, Region, MACHINE_TAG_KEYS, REGIONS};
pub use measurements::{standard_measurements, SimulatedMeasurement};
pub use point::{FieldValue, Point};
