//! Listing view model: query controller, backend fetch and render phase.
//!
//! Fetch parameters are re-derived from the controller's state for every
//! fetch. Each fetch takes a ticket; only the result for the latest ticket is
//! applied, so a slow response for an old query never overwrites a newer one.

use std::sync::Arc;

use async_trait::async_trait;
use cdm_admin_core::{
    AddressBar, ErrorReport, FetchParams, PaginationSortController, PaginationSummary, UserProfile,
};
use cdm_admin_storage::traits::SalesmanStore;
use cdm_admin_storage::{PaginatedResult, StorageError};

/// Backend call behind a listing view.
#[async_trait]
pub trait ListingSource<T>: Send + Sync {
    async fn fetch(&self, params: &FetchParams) -> Result<PaginatedResult<T>, StorageError>;
}

#[async_trait]
impl<S: SalesmanStore + ?Sized> ListingSource<UserProfile> for S {
    async fn fetch(
        &self,
        params: &FetchParams,
    ) -> Result<PaginatedResult<UserProfile>, StorageError> {
        self.list_salesmen(params).await
    }
}

/// Toast collaborator. Formatting and display are up to the implementor.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: &ErrorReport);
}

/// Reports through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: &ErrorReport) {
        tracing::error!(title = %report.title, description = %report.description, "listing fetch failed");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPhase<T> {
    /// No fetch has been started yet.
    Idle,
    Loading,
    /// The fetch succeeded with zero rows.
    Empty,
    Loaded(PaginatedResult<T>),
    Failed(ErrorReport),
}

/// Identifies one fetch; carries the parameters it was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    pub params: FetchParams,
}

pub struct ListingView<A, T> {
    controller: PaginationSortController<A>,
    source: Arc<dyn ListingSource<T>>,
    reporter: Arc<dyn ErrorReporter>,
    phase: ListingPhase<T>,
    /// Total count of the last successful fetch, kept while reloading.
    total_elements: Option<u64>,
    latest_ticket: u64,
}

pub type SalesmanListing<A> = ListingView<A, UserProfile>;

impl<A: AddressBar, T: Send + 'static> ListingView<A, T> {
    pub fn new(
        controller: PaginationSortController<A>,
        source: Arc<dyn ListingSource<T>>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            controller,
            source,
            reporter,
            phase: ListingPhase::Idle,
            total_elements: None,
            latest_ticket: 0,
        }
    }

    pub const fn controller(&self) -> &PaginationSortController<A> {
        &self.controller
    }

    /// Query changes go through the controller; call [`Self::refresh`]
    /// afterwards to fetch the new page.
    pub const fn controller_mut(&mut self) -> &mut PaginationSortController<A> {
        &mut self.controller
    }

    pub const fn phase(&self) -> &ListingPhase<T> {
        &self.phase
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, ListingPhase::Loading)
    }

    pub fn rows(&self) -> &[T] {
        match &self.phase {
            ListingPhase::Loaded(page) => &page.rows,
            _ => &[],
        }
    }

    /// Pagination bar for the last successful fetch. Hidden while loading.
    pub fn pagination(&self) -> Option<PaginationSummary> {
        if self.is_loading() {
            return None;
        }
        let total = self.total_elements?;
        let state = self.controller.state();
        Some(PaginationSummary::new(state.page(), state.page_size(), total))
    }

    /// Starts a fetch for the current query; supersedes any earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        self.phase = ListingPhase::Loading;
        FetchTicket { id: self.latest_ticket, params: self.controller.fetch_params() }
    }

    /// Applies a fetch result. Returns `false` when `ticket` was superseded
    /// and the result was discarded.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PaginatedResult<T>, StorageError>,
    ) -> bool {
        if ticket.id != self.latest_ticket {
            tracing::warn!(
                ticket = ticket.id,
                latest = self.latest_ticket,
                "discarding stale listing result"
            );
            return false;
        }
        self.phase = match result {
            Ok(page) => {
                self.total_elements = Some(page.total_elements);
                if page.is_empty() { ListingPhase::Empty } else { ListingPhase::Loaded(page) }
            },
            Err(e) => {
                let report = ErrorReport::fetch_failed(&e);
                self.reporter.report(&report);
                self.total_elements = None;
                ListingPhase::Failed(report)
            },
        };
        true
    }

    /// Fetches the current query and applies the result.
    pub async fn refresh(&mut self) -> &ListingPhase<T> {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.params).await;
        self.finish_fetch(ticket, result);
        &self.phase
    }

    pub fn source(&self) -> Arc<dyn ListingSource<T>> {
        Arc::clone(&self.source)
    }
}
