//! Shared constants for cdm-admin.

/// First page of every listing. Pages are 1-based.
pub const DEFAULT_PAGE: u32 = 1;

/// Page sizes offered by the page-size selector, in display order.
pub const PAGE_SIZE_SELECTIONS: [u32; 4] = [10, 25, 50, 100];

/// Address-bar key for the 1-based page number.
pub const PARAM_PAGE: &str = "page";

/// Address-bar key for the page size.
pub const PARAM_PAGE_SIZE: &str = "pageSize";

/// Address-bar key for the sort column.
pub const PARAM_SORT_BY: &str = "sortBy";

/// Address-bar key for the sort direction (`"true"` / `"false"`).
pub const PARAM_SORT_DESC: &str = "sortDesc";

/// Address-bar key for the free-text search term.
pub const PARAM_TEXT_SEARCH: &str = "textSearch";

/// Scope key narrowing a listing to one owning company.
pub const PARAM_COMPANY_ID: &str = "companyId";

/// Scope key narrowing a listing to a set of statuses (comma-joined).
pub const PARAM_STATUS: &str = "status";

/// Scope key narrowing the salesman listing to one region.
pub const PARAM_REGION: &str = "region";

/// Scope key narrowing the salesman listing to a set of roles (comma-joined).
pub const PARAM_ROLE: &str = "role";

/// Separator for multi-value scope parameters.
pub const LIST_SEPARATOR: &str = ",";

/// Query key of the salesman listing view.
pub const SALESMAN_VIEW: &str = "salesman";

/// Toast title used when a listing or profile fetch fails.
pub const FETCH_FAILED_TITLE: &str = "Failed fetching data";
