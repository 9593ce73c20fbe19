//! Core data types for the hit store
//!
//! - `Hit`: one recorded visit (name, URL, display timestamp)
//! - `StoreState`: whether the store currently holds any hits

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Default display format for hit timestamps.
///
/// Renders like `1/2/2024, 9:05:03 AM`. The date part ends at the first comma,
/// which is what per-day grouping keys on.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A single recorded hit
///
/// Immutable once created: fields are only readable through accessors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hit {
    name: String,
    url: String,
    time: String,
}

impl Hit {
    /// Create a hit with an already formatted timestamp
    pub fn new(name: impl Into<String>, url: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            time: time.into(),
        }
    }

    /// Create a hit stamped with the current local time
    pub fn now(name: impl Into<String>, url: impl Into<String>, time_format: &str) -> Self {
        Self::new(name, url, format_time(&Local::now(), time_format))
    }

    /// Who reported the hit
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The visited resource
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Display timestamp captured at record time
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Date component of the timestamp: everything before the first comma.
    ///
    /// A timestamp without a comma is returned whole.
    pub fn day(&self) -> &str {
        self.time
            .split_once(',')
            .map(|(day, _)| day)
            .unwrap_or(self.time.as_str())
    }
}

/// Format a moment with a strftime-style pattern.
///
/// An invalid pattern falls back to [`DEFAULT_TIME_FORMAT`].
pub fn format_time<Tz>(moment: &DateTime<Tz>, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", moment.format(time_format)).is_err() {
        tracing::warn!(time_format, "Invalid time format, using default");
        return moment.format(DEFAULT_TIME_FORMAT).to_string();
    }
    out
}

/// Lifecycle state of the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreState {
    /// No hits recorded
    Empty,
    /// One or more hits recorded
    Populated,
}

impl std::fmt::Display for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreState::Empty => write!(f, "empty"),
            StoreState::Populated => write!(f, "populated"),
        }
    }
}
