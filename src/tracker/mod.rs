//! Hitdash Tracker
//!
//! Everything derived from the stored hits:
//!
//! - **filter**: Narrow hits by exact name and/or URL
//! - **aggregate**: Per-user, per-URL and per-day counts, leaderboard
//! - **export**: CSV export (and reading it back)
//!
//! # Pipeline
//!
//! ```text
//! HitStore::hits() → HitFilter::apply → Summary::compute / to_csv
//! ```
//!
//! # Example
//!
//! ```rust
//! use hitdash::storage::Hit;
//! use hitdash::tracker::{HitFilter, Summary};
//!
//! let hits = vec![
//!     Hit::new("A", "http://x", "1/1/2024, 10:00:00 AM"),
//!     Hit::new("B", "http://x", "1/1/2024, 11:00:00 AM"),
//! ];
//!
//! let filtered = HitFilter::all().url("http://x").apply(&hits);
//! let summary = Summary::compute(&filtered, 5);
//! assert_eq!(summary.per_day[0].count, 2);
//! ```

pub mod aggregate;
pub mod export;
pub mod filter;

pub use aggregate::{
    count_by, leaderboard, least_visited, most_visited, per_day, per_url, per_user, ranked_urls,
    CountEntry, Summary, DEFAULT_LEADERBOARD_SIZE,
};
pub use export::{
    import_file, read_csv, to_csv, write_csv, CsvImportResult, CSV_CONTENT_TYPE, CSV_HEADER,
    EXPORT_FILE_NAME,
};
pub use filter::{FilterChoices, HitFilter};
