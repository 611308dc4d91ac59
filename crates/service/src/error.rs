//! Typed error enum for the service layer.
//!
//! Callers match on failure modes instead of downcasting boxed errors.
//! Failures of a deduplicated request arrive shared, so the storage error
//! may be behind an `Arc`.

use std::sync::Arc;

use cdm_admin_storage::StorageError;
use thiserror::Error;

use crate::dedup_cache::DedupError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed for this caller alone.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Storage operation failed for every caller joined to the request.
    #[error("storage: {0}")]
    SharedStorage(Arc<StorageError>),

    /// The in-flight request died before producing a result.
    #[error("request aborted before completion")]
    Aborted,

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    fn storage(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(e) => Some(e),
            Self::SharedStorage(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Aborted) || self.storage().is_some_and(StorageError::is_transient)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self.storage(), Some(StorageError::NotFound { .. }))
    }

    /// Whether the request itself was at fault, as opposed to the backend.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
            || self.storage().is_some_and(StorageError::is_invalid_request)
    }
}

impl From<DedupError<StorageError>> for ServiceError {
    fn from(err: DedupError<StorageError>) -> Self {
        match err {
            DedupError::Failed(e) => Self::SharedStorage(e),
            DedupError::Aborted => Self::Aborted,
        }
    }
}
