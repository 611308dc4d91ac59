//! Merging a [`QueryUpdate`] into a [`QueryState`] under the page-reset rule.
//!
//! A new search term, a different page size, any sort field being set, or a
//! changed scope filter invalidates "page N" of the old result set, so the
//! merged state goes back to page 1 whatever page the update asked for.

use crate::constants::DEFAULT_PAGE;
use crate::query_state::{Patch, QueryState, QueryUpdate, non_empty};

/// The update sets a non-empty search term different from the current one.
pub fn text_search_changed(old: &QueryState, update: &QueryUpdate) -> bool {
    update
        .text_search
        .as_set()
        .and_then(|term| non_empty(term))
        .is_some_and(|term| old.text_search.as_deref() != Some(term.as_str()))
}

pub fn page_size_changed(old: &QueryState, update: &QueryUpdate) -> bool {
    update.page_size.is_some_and(|size| size != old.page_size)
}

/// Setting the sort column resets even when the value is unchanged.
pub const fn sort_by_set(update: &QueryUpdate) -> bool {
    update.sort_by.is_set()
}

/// Setting the sort direction resets even when the value is unchanged.
pub const fn sort_desc_set(update: &QueryUpdate) -> bool {
    update.sort_desc.is_set()
}

/// Some scope filter is set to a value different from the current one.
pub fn scope_changed(old: &QueryState, update: &QueryUpdate) -> bool {
    update.scope.iter().any(|(key, patch)| match patch {
        Patch::Set(value) => old.scope.get(key) != Some(value),
        Patch::Keep | Patch::Clear => false,
    })
}

pub fn requires_page_reset(old: &QueryState, update: &QueryUpdate) -> bool {
    text_search_changed(old, update)
        || page_size_changed(old, update)
        || sort_by_set(update)
        || sort_desc_set(update)
        || scope_changed(old, update)
}

/// Produces the state that replaces `old`.
pub fn apply_update(old: &QueryState, update: QueryUpdate) -> QueryState {
    let reset = requires_page_reset(old, &update);
    let QueryUpdate { page, page_size, sort_by, sort_desc, text_search, scope: scope_patches } =
        update;

    let mut scope = old.scope.clone();
    for (key, patch) in scope_patches {
        match patch {
            Patch::Keep => {},
            Patch::Set(value) => {
                scope.insert(key, value);
            },
            Patch::Clear => {
                scope.remove(&key);
            },
        }
    }

    let page = if reset { DEFAULT_PAGE } else { page.map_or(old.page, |p| p.max(DEFAULT_PAGE)) };

    QueryState {
        page,
        page_size: page_size.unwrap_or(old.page_size),
        sort_by: sort_by.apply(old.sort_by.clone()).and_then(|key| non_empty(&key)),
        sort_desc: sort_desc.apply(old.sort_desc),
        text_search: text_search.apply(old.text_search.clone()).and_then(|term| non_empty(&term)),
        scope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_state::{PageSize, ScopeValue};

    fn on_page(page: u32) -> QueryState {
        QueryState::default().with_page(page)
    }

    #[test]
    fn test_new_search_term_resets_page() {
        let next = apply_update(&on_page(5), QueryUpdate::text_search("abc"));
        assert_eq!(next.page(), 1);
        assert_eq!(next.text_search(), Some("abc"));
    }

    #[test]
    fn test_same_search_term_keeps_page() {
        let old = on_page(5).with_text_search("abc");
        assert!(!text_search_changed(&old, &QueryUpdate::text_search("abc")));
        assert!(!text_search_changed(&old, &QueryUpdate::text_search(" abc ")));
        assert_eq!(apply_update(&old, QueryUpdate::text_search("abc")).page(), 5);
    }

    #[test]
    fn test_clearing_search_alone_keeps_page() {
        let old = on_page(5).with_text_search("abc");
        assert!(!requires_page_reset(&old, &QueryUpdate::clear_text_search()));
        let next = apply_update(&old, QueryUpdate::clear_text_search());
        assert_eq!(next.page(), 5);
        assert_eq!(next.text_search(), None);
    }

    #[test]
    fn test_explicit_page_merges_without_reset() {
        let old = QueryState::default().with_sort("name", true).with_text_search("x");
        let next = apply_update(&old, QueryUpdate::page(3));
        assert_eq!(next.page(), 3);
        assert_eq!(next, old.with_page(3));
    }

    #[test]
    fn test_page_zero_is_floored_to_one() {
        assert_eq!(apply_update(&on_page(4), QueryUpdate::page(0)).page(), 1);
    }

    #[test]
    fn test_page_size_change_resets() {
        let old = on_page(7);
        assert!(page_size_changed(&old, &QueryUpdate::page_size(PageSize::Fifty)));
        assert!(!page_size_changed(&old, &QueryUpdate::page_size(PageSize::Ten)));
        let next = apply_update(&old, QueryUpdate::page_size(PageSize::Fifty));
        assert_eq!((next.page(), next.page_size()), (1, PageSize::Fifty));
    }

    #[test]
    fn test_reset_wins_over_requested_page() {
        let update = QueryUpdate::page_size(PageSize::Fifty).with_page(4);
        assert_eq!(apply_update(&on_page(2), update).page(), 1);
    }

    #[test]
    fn test_sort_set_resets_even_when_unchanged() {
        let old = on_page(3).with_sort("name", false);
        let update = QueryUpdate::sort("name", false);
        assert!(sort_by_set(&update));
        assert!(sort_desc_set(&update));
        assert_eq!(apply_update(&old, update).page(), 1);
    }

    #[test]
    fn test_sort_desc_alone_resets() {
        let update = QueryUpdate { sort_desc: Patch::Set(true), ..QueryUpdate::default() };
        assert!(!sort_by_set(&update));
        assert!(sort_desc_set(&update));
        assert!(requires_page_reset(&on_page(3), &update));
    }

    #[test]
    fn test_clearing_sort_keeps_page() {
        let old = on_page(3).with_sort("name", true);
        let next = apply_update(&old, QueryUpdate::clear_sort());
        assert_eq!(next.page(), 3);
        assert!(next.sort().is_none());
        assert_eq!(next.sort_desc(), None);
    }

    #[test]
    fn test_scope_change_resets() {
        let old = on_page(6).with_scope("companyId", ScopeValue::single("a").unwrap());
        let same = QueryUpdate::scope("companyId", ScopeValue::single("a"));
        let other = QueryUpdate::scope("companyId", ScopeValue::single("b"));
        assert!(!scope_changed(&old, &same));
        assert!(scope_changed(&old, &other));
        assert_eq!(apply_update(&old, other).page(), 1);
    }

    #[test]
    fn test_scope_list_compared_by_joined_value() {
        let old = on_page(2).with_scope("status", ScopeValue::list(["a", "b"]).unwrap());
        let same = QueryUpdate::scope("status", ScopeValue::list(["a", "b"]));
        let reordered = QueryUpdate::scope("status", ScopeValue::list(["b", "a"]));
        assert!(!scope_changed(&old, &same));
        assert!(scope_changed(&old, &reordered));
    }

    #[test]
    fn test_clearing_scope_removes_filter_without_reset() {
        let old = on_page(2).with_scope("status", ScopeValue::list(["a"]).unwrap());
        let next = apply_update(&old, QueryUpdate::scope("status", None));
        assert_eq!(next.page(), 2);
        assert!(next.scope().is_empty());
    }

    #[test]
    fn test_empty_update_is_identity() {
        let old = on_page(8).with_sort("email", true).with_text_search("q");
        assert_eq!(apply_update(&old, QueryUpdate::default()), old);
    }
}
