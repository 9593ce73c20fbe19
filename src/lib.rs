//! # Hitdash
//!
//! Hit Dashboard - record which pages people visit, summarize the hits per
//! user, per URL and per day, and export them as CSV.
//!
//! ## Features
//!
//! - **Local persistence**: the hit list lives in one JSON entry, rewritten on every change
//! - **Filtering**: narrow by exact name and/or URL
//! - **Aggregates**: per-user, per-URL, per-day counts and a URL leaderboard
//! - **Export**: `hits.csv` with a `Name,URL,Time` header
//!
//! ## Modules
//!
//! - [`storage`]: Hit type and the persisted store
//! - [`tracker`]: Filter, aggregates, CSV export/import
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hitdash::storage::{HitStore, StoreConfig};
//! use hitdash::tracker::{HitFilter, Summary};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = HitStore::load(StoreConfig::new("./data"))?;
//!
//!     store.record("alice", "https://example.com")?;
//!     store.record("bob", "https://example.com")?;
//!
//!     let filtered = HitFilter::all().apply(store.hits());
//!     let summary = Summary::compute(&filtered, 5);
//!
//!     if let Some(top) = summary.most_visited {
//!         println!("Most visited: {} ({} hits)", top.key, top.count);
//!     }
//!
//!     store.close()?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod storage;
pub mod telemetry;
pub mod tracker;

// Re-export top-level types for convenience
pub use storage::{Hit, HitStore, StoreConfig, StoreError, StoreResult, StoreState};

pub use tracker::{CountEntry, FilterChoices, HitFilter, Summary};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig};
