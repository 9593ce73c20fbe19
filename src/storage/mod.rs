//! Hitdash Storage
//!
//! This module provides the persisted hit list:
//!
//! - **types**: Core data structures (Hit, StoreState)
//! - **store**: The owned store with explicit load/save
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//!   record(name, url) → presence check → append → rewrite `hits` entry
//!
//! Read Path:
//!   load → hits() → filter → aggregate / export
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use hitdash::storage::{HitStore, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = HitStore::load(StoreConfig::new("./data"))?;
//!
//!     store.record("alice", "https://example.com")?;
//!     println!("{} hits recorded", store.len());
//!
//!     store.close()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use store::{HitStore, StoreConfig, HITS_KEY};
pub use types::{format_time, Hit, StoreState, DEFAULT_TIME_FORMAT};
