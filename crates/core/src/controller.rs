//! Owner of a view's canonical [`QueryState`].
//!
//! Every change goes through [`PaginationSortController::update`], which
//! applies the page-reset rule and then writes the encoded state back to the
//! address bar with a replace navigation.

use crate::address_bar::AddressBar;
use crate::codec::QueryStringCodec;
use crate::constants::DEFAULT_PAGE;
use crate::fetch::FetchParams;
use crate::query_state::{PageSize, QueryState, QueryUpdate};
use crate::reset::{apply_update, requires_page_reset};
use crate::search::{search_input_text, search_submit_update};
use crate::sort::{
    SortColumnState, SortOrder, column_sort_state, derive_column_sort_order, sort_cycle_update,
};

pub struct PaginationSortController<A> {
    codec: QueryStringCodec,
    state: QueryState,
    address_bar: A,
}

impl<A: AddressBar> PaginationSortController<A> {
    /// Builds the initial state from the address bar, falling back to the
    /// codec's defaults, and writes the canonical form back.
    pub fn new(codec: QueryStringCodec, address_bar: A) -> Self {
        let state = codec.decode(&address_bar.params());
        let mut controller = Self { codec, state, address_bar };
        controller.sync_address_bar();
        controller
    }

    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    pub const fn codec(&self) -> &QueryStringCodec {
        &self.codec
    }

    pub const fn address_bar(&self) -> &A {
        &self.address_bar
    }

    pub fn into_address_bar(self) -> A {
        self.address_bar
    }

    pub fn update(&mut self, update: QueryUpdate) {
        let reset = requires_page_reset(&self.state, &update);
        let next = apply_update(&self.state, update);
        tracing::debug!(
            reset,
            from_page = self.state.page(),
            to_page = next.page(),
            "query state updated"
        );
        self.state = next;
        self.sync_address_bar();
    }

    /// Jump-to-page input; values below 1 land on page 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.update(QueryUpdate::page(page.max(DEFAULT_PAGE)));
    }

    /// Returns `false` (and does nothing) on the first page.
    pub fn previous_page(&mut self) -> bool {
        let page = self.state.page();
        if page <= DEFAULT_PAGE {
            return false;
        }
        self.update(QueryUpdate::page(page - 1));
        true
    }

    /// Returns `false` (and does nothing) on the last page.
    pub fn next_page(&mut self, total_pages: u64) -> bool {
        let page = self.state.page();
        if u64::from(page) >= total_pages {
            return false;
        }
        self.update(QueryUpdate::page(page.saturating_add(1)));
        true
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.update(QueryUpdate::page_size(page_size));
    }

    pub fn submit_search(&mut self, raw: &str) {
        self.update(search_submit_update(raw));
    }

    pub fn search_input(&self) -> &str {
        search_input_text(&self.state)
    }

    /// Header click on a sortable column.
    pub fn click_header(&mut self, column_key: &str) {
        let update = sort_cycle_update(column_key, &self.state);
        self.update(update);
    }

    pub fn column_sort_order(&self, column_key: &str) -> SortOrder {
        derive_column_sort_order(column_key, &self.state)
    }

    pub fn column_sort(&self, column_key: &str) -> SortColumnState {
        column_sort_state(column_key, &self.state)
    }

    pub fn fetch_params(&self) -> FetchParams {
        FetchParams::from(&self.state)
    }

    /// Re-derives the state after the location changed underneath the view
    /// (back/forward navigation). Returns whether the state changed.
    pub fn reload_from_address_bar(&mut self) -> bool {
        let state = self.codec.decode(&self.address_bar.params());
        if state == self.state {
            return false;
        }
        tracing::debug!(page = state.page(), "query state reloaded from address bar");
        self.state = state;
        true
    }

    fn sync_address_bar(&mut self) {
        let params = self.codec.encode(&self.state);
        self.address_bar.replace(params);
    }
}
