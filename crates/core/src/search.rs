//! Search box submit handling.

use crate::constants::DEFAULT_PAGE;
use crate::query_state::{QueryState, QueryUpdate, non_empty};

/// Update for a submitted search box.
///
/// A blank box clears the search and returns to the first page explicitly;
/// clearing alone would not trigger the page reset.
pub fn search_submit_update(raw: &str) -> QueryUpdate {
    match non_empty(raw) {
        Some(term) => QueryUpdate::text_search(&term),
        None => QueryUpdate::clear_text_search().with_page(DEFAULT_PAGE),
    }
}

/// Text the search box starts with.
pub fn search_input_text(state: &QueryState) -> &str {
    state.text_search().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_update;

    #[test]
    fn test_blank_submit_clears_and_goes_to_first_page() {
        let state = QueryState::default().with_page(4).with_text_search("old");
        let next = apply_update(&state, search_submit_update("   "));
        assert_eq!(next.text_search(), None);
        assert_eq!(next.page(), 1);
    }

    #[test]
    fn test_submit_trims_term() {
        let next = apply_update(&QueryState::default().with_page(3), search_submit_update(" ada "));
        assert_eq!(next.text_search(), Some("ada"));
        assert_eq!(next.page(), 1);
    }

    #[test]
    fn test_input_text_mirrors_state() {
        assert_eq!(search_input_text(&QueryState::default()), "");
        assert_eq!(search_input_text(&QueryState::default().with_text_search("kim")), "kim");
    }
}
