use std::sync::Arc;

use cdm_admin_core::UserProfile;
use cdm_admin_storage::StorageError;
use cdm_admin_storage::traits::ProfileStore;

use crate::dedup_cache::RequestDedupCache;
use crate::error::ServiceError;

type ProfileCache = RequestDedupCache<String, Option<UserProfile>, StorageError>;

/// Profile lookups keyed on user id. Concurrent lookups for the same id
/// share one backend call; nothing is cached once it settles.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    in_flight: ProfileCache,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store, in_flight: ProfileCache::new() }
    }

    /// `Ok(None)` when the store has no row for `user_id`.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ServiceError> {
        let store = Arc::clone(&self.store);
        let id = user_id.to_owned();
        self.in_flight
            .fetch_or_join(user_id.to_owned(), move || async move { store.get_profile(&id).await })
            .await
            .map_err(ServiceError::from)
    }

    pub async fn require_profile(&self, user_id: &str) -> Result<UserProfile, ServiceError> {
        self.get_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound { entity: "profile", id: user_id.to_owned() })
    }

    /// User ids with a lookup currently in flight.
    pub fn pending_lookups(&self) -> usize {
        self.in_flight.len()
    }
}
