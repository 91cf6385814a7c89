//! The time seam.
//!
//! Timestamps are strings the moment they are minted, so the rest of the
//! library never touches a time type. Tests inject a scripted clock to pin
//! timestamps to fixed values.

use chrono::{SecondsFormat, Utc};

/// Source of emit timestamps.
pub trait Clock: Send {
    /// The current instant as ISO-8601 UTC with millisecond precision and a
    /// trailing `Z` (e.g. `2025-01-15T10:30:00.000Z`).
    fn now(&self) -> String;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
