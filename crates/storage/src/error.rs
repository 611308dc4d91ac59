//! Typed error enum for storage operations.

use std::path::PathBuf;

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Listing requested an ordering on a column the store cannot sort by.
    #[error("unsupported sort key: {0}")]
    UnsupportedSortKey(String),

    /// Listing requested a scope filter the store does not know.
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Backing store is unreachable or its lock was poisoned.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Whether the caller asked for something the store cannot do.
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::UnsupportedSortKey(_) | Self::UnsupportedFilter(_))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
