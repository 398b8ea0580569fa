//! ---
//! hostsim_section: "01-core-functionality"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Shared primitives and utilities for the generator runtime."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
//! Core shared primitives for the hostsim workspace.
//! This crate exposes configuration loading, logging setup, generation
//! reporting and time helpers consumed by the generator binary.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod time;

pub use config::{
    GeneratorConfig, HostsConfig, LoadedGeneratorConfig, LoggingConfig, OutputConfig, OutputFormat,
};
pub use logging::{init_tracing, LogFormat};
pub use metrics::{TickReport, TickSummary};
