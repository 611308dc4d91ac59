//! Backend fetch parameters derived from a [`QueryState`].

use crate::pagination::row_range;
use crate::query_state::{PageSize, QueryState, ScopeFilters};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub descending: bool,
}

/// Exactly the fields a listing backend is called with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: u32,
    pub page_size: PageSize,
    pub sort: Option<SortSpec>,
    pub text_search: Option<String>,
    pub scope: ScopeFilters,
}

impl FetchParams {
    /// Zero-based inclusive row offsets of the requested page.
    pub fn row_range(&self) -> (u64, u64) {
        row_range(self.page, self.page_size)
    }
}

impl From<&QueryState> for FetchParams {
    fn from(state: &QueryState) -> Self {
        Self {
            page: state.page(),
            page_size: state.page_size(),
            sort: state
                .sort()
                .map(|(key, descending)| SortSpec { key: key.to_owned(), descending }),
            text_search: state.text_search().map(ToOwned::to_owned),
            scope: state.scope().clone(),
        }
    }
}
