//! Response types (Serialize)

use serde::{Deserialize, Serialize};

use cdm_admin_core::{PageSize, PaginationSummary, QueryParams, QueryState};
use cdm_admin_storage::PaginatedResult;

/// One listing page as the dashboard table renders it.
///
/// `query` is the canonical form of the request's parameters: what the
/// address bar should hold after the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse<T> {
    pub rows: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page: u32,
    pub page_size: PageSize,
    pub query: QueryParams,
}

impl<T> ListingResponse<T> {
    pub fn new(state: &QueryState, result: PaginatedResult<T>, query: QueryParams) -> Self {
        let total_pages = result.total_pages(state.page_size());
        Self {
            rows: result.rows,
            total_elements: result.total_elements,
            total_pages,
            page: state.page(),
            page_size: state.page_size(),
            query,
        }
    }

    /// Pagination bar for this page.
    pub fn pagination(&self) -> PaginationSummary {
        PaginationSummary::new(self.page, self.page_size, self.total_elements)
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}
