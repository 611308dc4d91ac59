//! In-memory store over a list of user profiles.
//!
//! Search is a case-insensitive substring match on name or email; ordering
//! puts missing values last when ascending and first when descending.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use cdm_admin_core::{
    FetchParams, PARAM_REGION, PARAM_ROLE, ScopeFilters, ScopeValue, SortSpec, UserProfile,
};

use crate::error::StorageError;
use crate::traits::{ProfileStore, SalesmanStore};
use crate::types::PaginatedResult;

/// Columns the salesman listing can be ordered by.
pub const SALESMAN_SORT_KEYS: [&str; 5] = ["name", "email", "region", "role", "created_at"];

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    rows: Arc<RwLock<Vec<UserProfile>>>,
}

fn read_rows(
    lock: &RwLock<Vec<UserProfile>>,
) -> Result<RwLockReadGuard<'_, Vec<UserProfile>>, StorageError> {
    lock.read().map_err(|e: PoisonError<_>| StorageError::Unavailable(format!("lock poisoned: {e}")))
}

impl MemoryStorage {
    pub fn new(rows: Vec<UserProfile>) -> Self {
        Self { rows: Arc::new(RwLock::new(rows)) }
    }

    /// Parses a JSON array of profiles.
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        let rows: Vec<UserProfile> = serde_json::from_str(json)?;
        Ok(Self::new(rows))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| StorageError::Seed { path: path.to_path_buf(), source })?;
        let storage = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), rows = storage.len(), "seeded in-memory storage");
        Ok(storage)
    }

    /// Inserts or replaces the profile with the same id.
    pub fn upsert(&self, profile: UserProfile) -> Result<(), StorageError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StorageError::Unavailable(format!("lock poisoned: {e}")))?;
        match rows.iter_mut().find(|row| row.id == profile.id) {
            Some(row) => *row = profile,
            None => rows.push(profile),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        read_rows(&self.rows).map(|rows| rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn matches_search(row: &UserProfile, term: Option<&str>) -> bool {
    let Some(term) = term else {
        return true;
    };
    let needle = term.to_lowercase();
    contains_ignore_case(row.name.as_deref(), &needle)
        || contains_ignore_case(row.email.as_deref(), &needle)
}

fn scope_accepts(value: &ScopeValue, actual: Option<&str>) -> bool {
    let Some(actual) = actual else {
        return false;
    };
    match value {
        ScopeValue::Single(expected) => expected == actual,
        ScopeValue::List(allowed) => allowed.iter().any(|a| a == actual),
    }
}

fn matches_scope(row: &UserProfile, scope: &ScopeFilters) -> Result<bool, StorageError> {
    for (key, value) in scope {
        let actual = match key.as_str() {
            PARAM_REGION => row.region.as_deref(),
            PARAM_ROLE => Some(row.role.as_str()),
            other => return Err(StorageError::UnsupportedFilter(other.to_owned())),
        };
        if !scope_accepts(value, actual) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `None` after every value.
fn cmp_nullable<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn comparator(
    sort: &SortSpec,
) -> Result<impl Fn(&UserProfile, &UserProfile) -> Ordering, StorageError> {
    let key = sort.key.clone();
    if !SALESMAN_SORT_KEYS.contains(&key.as_str()) {
        return Err(StorageError::UnsupportedSortKey(key));
    }
    let descending = sort.descending;
    Ok(move |a: &UserProfile, b: &UserProfile| {
        let ordering = match key.as_str() {
            "name" => cmp_nullable(a.name.as_deref(), b.name.as_deref()),
            "email" => cmp_nullable(a.email.as_deref(), b.email.as_deref()),
            "region" => cmp_nullable(a.region.as_deref(), b.region.as_deref()),
            "role" => a.role.cmp(&b.role),
            _ => cmp_nullable(a.created_at, b.created_at),
        };
        if descending { ordering.reverse() } else { ordering }
    })
}

#[async_trait]
impl ProfileStore for MemoryStorage {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StorageError> {
        let rows = read_rows(&self.rows)?;
        Ok(rows.iter().find(|row| row.id == user_id).cloned())
    }
}

#[async_trait]
impl SalesmanStore for MemoryStorage {
    async fn list_salesmen(
        &self,
        params: &FetchParams,
    ) -> Result<PaginatedResult<UserProfile>, StorageError> {
        let mut matched: Vec<UserProfile> = Vec::new();
        {
            let rows = read_rows(&self.rows)?;
            for row in rows.iter() {
                if matches_search(row, params.text_search.as_deref())
                    && matches_scope(row, &params.scope)?
                {
                    matched.push(row.clone());
                }
            }
        }

        if let Some(sort) = &params.sort {
            matched.sort_by(comparator(sort)?);
        }

        let total_elements = matched.len() as u64;
        let (from, _) = params.row_range();
        let size = params.page_size.get() as usize;
        let rows: Vec<UserProfile> = matched
            .into_iter()
            .skip(usize::try_from(from).unwrap_or(usize::MAX))
            .take(size)
            .collect();

        tracing::debug!(
            page = params.page,
            returned = rows.len(),
            total_elements,
            "listed salesmen"
        );
        Ok(PaginatedResult::new(rows, total_elements))
    }
}
