//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::storage::{Hit, StoreState};
use crate::tracker::HitFilter;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// HIT DTOs
// ============================================

/// Record request. Missing fields count as empty and are ignored like them.
#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Filter selection from the query string. Empty values mean "all".
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FilterParams {
    pub fn to_filter(&self) -> HitFilter {
        HitFilter::from_selection(self.name.clone(), self.url.clone())
    }
}

/// One row of the hit log
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HitRow {
    /// 1-based position in the filtered log
    pub index: usize,
    pub name: String,
    pub url: String,
    pub time: String,
}

impl HitRow {
    pub fn new(index: usize, hit: &Hit) -> Self {
        Self {
            index,
            name: hit.name().to_string(),
            url: hit.url().to_string(),
            time: hit.time().to_string(),
        }
    }
}

/// Filtered hit log
#[derive(Debug, Serialize, Deserialize)]
pub struct HitListResponse {
    /// Number of hits matching the filter
    pub total: usize,
    pub hits: Vec<HitRow>,
}

impl HitListResponse {
    pub fn from_hits(hits: &[&Hit]) -> Self {
        Self {
            total: hits.len(),
            hits: hits
                .iter()
                .enumerate()
                .map(|(i, h)| HitRow::new(i + 1, h))
                .collect(),
        }
    }
}

// ============================================
// STATS DTOs
// ============================================

/// Stats query: filter selection plus optional leaderboard size.
/// An empty `top` means the configured default.
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub top: Option<usize>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl StatsParams {
    pub fn to_filter(&self) -> HitFilter {
        HitFilter::from_selection(self.name.clone(), self.url.clone())
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Store lifecycle state
    pub store_state: StoreState,
    /// Number of stored hits
    pub hits: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
