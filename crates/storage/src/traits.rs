//! Storage backend trait abstraction
//!
//! Async domain traits the service layer depends on; the hosted backend and
//! the in-memory store implement the same contracts.

use async_trait::async_trait;
use cdm_admin_core::{FetchParams, UserProfile};

use crate::error::StorageError;
use crate::types::PaginatedResult;

/// Profile lookups by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get the profile row for `user_id`, `None` if there is none.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StorageError>;
}

/// The salesman listing.
#[async_trait]
pub trait SalesmanStore: Send + Sync {
    /// One page of salesmen matching `params`, with the total match count.
    async fn list_salesmen(
        &self,
        params: &FetchParams,
    ) -> Result<PaginatedResult<UserProfile>, StorageError>;
}
