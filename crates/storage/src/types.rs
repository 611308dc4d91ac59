//! Storage types shared across modules

use cdm_admin_core::{PageSize, total_pages};
use serde::{Deserialize, Serialize};

/// One page of rows plus the size of the whole filtered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub rows: Vec<T>,
    pub total_elements: u64,
}

impl<T> PaginatedResult<T> {
    pub const fn new(rows: Vec<T>, total_elements: u64) -> Self {
        Self { rows, total_elements }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Computed locally; the store only reports the element count.
    pub fn total_pages(&self, page_size: PageSize) -> u64 {
        total_pages(self.total_elements, page_size)
    }
}
