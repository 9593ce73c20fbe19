//! Storage error types
//!
//! Defines all errors that can occur while loading, saving, or importing hits.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization of the persisted entry failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV reader failed
    #[error("CSV error: {0}")]
    Csv(String),

    /// An imported row did not have the `Name,URL,Time` shape
    #[error("Invalid row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Csv(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
