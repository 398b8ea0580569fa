//! ---
//! hostsim_section: "01-core-functionality"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Shared primitives and utilities for the generator runtime."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Current wall-clock time truncated to whole seconds.
pub fn now_seconds() -> DateTime<Utc> {
    truncate_to_seconds(Utc::now())
}

/// Drop any sub-second component from an instant.
pub fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(TimeDelta::seconds(1))
        .unwrap_or(instant)
}

/// Parse an RFC 3339 timestamp and truncate it to second resolution.
pub fn parse_start(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid RFC 3339 start time '{}'", raw))?;
    Ok(truncate_to_seconds(parsed.with_timezone(&Utc)))
}

/// Convert a duration into microseconds, saturating at `u64::MAX`.
pub fn duration_to_micros(duration: Duration) -> u64 {
    duration
        .as_secs()
        .saturating_mul(1_000_000)
        .saturating_add(u64::from(duration.subsec_micros()))
}
