//! Listing parameters for one view: page, page size, sort, search, scope.
//!
//! A [`QueryState`] is replaced on every user-driven change, never edited in
//! place. Partial changes are described by a [`QueryUpdate`] and merged by
//! [`apply_update`](crate::apply_update).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, LIST_SEPARATOR, PAGE_SIZE_SELECTIONS};
use crate::error::{InvalidPageSize, ParsePageSizeError};

/// Number of rows per page, restricted to the selector's fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [Self; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    pub const fn get(self) -> u32 {
        match self {
            Self::Ten => PAGE_SIZE_SELECTIONS[0],
            Self::TwentyFive => PAGE_SIZE_SELECTIONS[1],
            Self::Fifty => PAGE_SIZE_SELECTIONS[2],
            Self::Hundred => PAGE_SIZE_SELECTIONS[3],
        }
    }

    /// Exact lookup. Values outside the set are rejected, not rounded.
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == value)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(InvalidPageSize(value))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = ParsePageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 =
            s.trim().parse().map_err(|_| ParsePageSizeError::NotANumber(s.to_owned()))?;
        Ok(Self::try_from(value)?)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Value of a named scope filter.
///
/// Constructors normalize: tokens are trimmed and empty tokens dropped, so an
/// empty value never exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeValue {
    Single(String),
    List(Vec<String>),
}

impl ScopeValue {
    pub fn single(value: impl AsRef<str>) -> Option<Self> {
        non_empty(value.as_ref()).map(Self::Single)
    }

    pub fn list<I, S>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = items.into_iter().filter_map(|s| non_empty(s.as_ref())).collect();
        if tokens.is_empty() { None } else { Some(Self::List(tokens)) }
    }

    /// Address-bar form; lists are comma-joined.
    pub fn encode(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(items) => items.join(LIST_SEPARATOR),
        }
    }
}

/// Named scope filters of a view, e.g. `companyId` or `status`.
pub type ScopeFilters = BTreeMap<String, ScopeValue>;

/// Trimmed, non-empty copy of `value`.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Canonical listing parameters.
///
/// `page` is always at least 1. `sort_desc` only matters while `sort_by` is
/// present; see [`QueryState::sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub(crate) page: u32,
    pub(crate) page_size: PageSize,
    pub(crate) sort_by: Option<String>,
    pub(crate) sort_desc: Option<bool>,
    pub(crate) text_search: Option<String>,
    pub(crate) scope: ScopeFilters,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: PageSize::default(),
            sort_by: None,
            sort_desc: None,
            text_search: None,
            scope: ScopeFilters::new(),
        }
    }
}

impl QueryState {
    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub const fn sort_desc(&self) -> Option<bool> {
        self.sort_desc
    }

    /// Ordering sent to the backend: `(column, descending)`. A direction
    /// without a column is no ordering; a column without a direction sorts
    /// ascending, though no header arrow is shown for it.
    pub fn sort(&self) -> Option<(&str, bool)> {
        self.sort_by.as_deref().map(|key| (key, self.sort_desc.unwrap_or(false)))
    }

    pub fn text_search(&self) -> Option<&str> {
        self.text_search.as_deref()
    }

    pub const fn scope(&self) -> &ScopeFilters {
        &self.scope
    }

    pub fn scope_value(&self, key: &str) -> Option<&ScopeValue> {
        self.scope.get(key)
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(DEFAULT_PAGE);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, key: impl AsRef<str>, descending: bool) -> Self {
        self.sort_by = non_empty(key.as_ref());
        self.sort_desc = Some(descending);
        self
    }

    #[must_use]
    pub fn with_sort_desc(mut self, descending: Option<bool>) -> Self {
        self.sort_desc = descending;
        self
    }

    #[must_use]
    pub fn without_sort(mut self) -> Self {
        self.sort_by = None;
        self.sort_desc = None;
        self
    }

    #[must_use]
    pub fn with_text_search(mut self, term: impl AsRef<str>) -> Self {
        self.text_search = non_empty(term.as_ref());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, key: impl Into<String>, value: ScopeValue) -> Self {
        self.scope.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn without_scope(mut self, key: &str) -> Self {
        self.scope.remove(key);
        self
    }
}

/// Tri-state field change: leave alone, replace, or remove.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T> Patch<T> {
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// `Some` becomes `Set`, `None` becomes `Clear`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }
}

/// Sparse change to a [`QueryState`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryUpdate {
    pub page: Option<u32>,
    pub page_size: Option<PageSize>,
    pub sort_by: Patch<String>,
    pub sort_desc: Patch<bool>,
    pub text_search: Patch<String>,
    pub scope: BTreeMap<String, Patch<ScopeValue>>,
}

impl QueryUpdate {
    pub fn page(page: u32) -> Self {
        Self { page: Some(page), ..Self::default() }
    }

    pub fn page_size(page_size: PageSize) -> Self {
        Self { page_size: Some(page_size), ..Self::default() }
    }

    pub fn sort(key: impl Into<String>, descending: bool) -> Self {
        Self {
            sort_by: Patch::Set(key.into()),
            sort_desc: Patch::Set(descending),
            ..Self::default()
        }
    }

    pub fn clear_sort() -> Self {
        Self { sort_by: Patch::Clear, sort_desc: Patch::Clear, ..Self::default() }
    }

    /// A blank term clears the search.
    pub fn text_search(term: &str) -> Self {
        Self { text_search: Patch::from_option(non_empty(term)), ..Self::default() }
    }

    pub fn clear_text_search() -> Self {
        Self { text_search: Patch::Clear, ..Self::default() }
    }

    /// `None` removes the filter.
    pub fn scope(key: impl Into<String>, value: Option<ScopeValue>) -> Self {
        Self::default().with_scope(key, value)
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, key: impl Into<String>, value: Option<ScopeValue>) -> Self {
        self.scope.insert(key.into(), Patch::from_option(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.page_size.is_none()
            && self.sort_by.is_keep()
            && self.sort_desc.is_keep()
            && self.text_search.is_keep()
            && self.scope.values().all(Patch::is_keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_rejects_unlisted_values() {
        assert_eq!(PageSize::from_value(25), Some(PageSize::TwentyFive));
        assert_eq!(PageSize::from_value(20), None);
        assert_eq!(PageSize::try_from(99), Err(InvalidPageSize(99)));
    }

    #[test]
    fn test_page_size_from_str() {
        assert_eq!(" 100".parse::<PageSize>(), Ok(PageSize::Hundred));
        assert_eq!(
            "30".parse::<PageSize>(),
            Err(ParsePageSizeError::Unsupported(InvalidPageSize(30)))
        );
        assert!(matches!("ten".parse::<PageSize>(), Err(ParsePageSizeError::NotANumber(_))));
    }

    #[test]
    fn test_page_size_serde_uses_plain_number() {
        let json = serde_json::to_string(&PageSize::Fifty).unwrap();
        assert_eq!(json, "50");
        assert!(serde_json::from_str::<PageSize>("30").is_err());
    }

    #[test]
    fn test_default_state() {
        let state = QueryState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), PageSize::Ten);
        assert!(state.sort().is_none());
        assert!(state.text_search().is_none());
        assert!(state.scope().is_empty());
    }

    #[test]
    fn test_with_page_never_below_one() {
        assert_eq!(QueryState::default().with_page(0).page(), 1);
        assert_eq!(QueryState::default().with_page(7).page(), 7);
    }

    #[test]
    fn test_sort_desc_alone_is_no_ordering() {
        let state = QueryState::default().with_sort_desc(Some(true));
        assert_eq!(state.sort_desc(), Some(true));
        assert!(state.sort().is_none());
    }

    #[test]
    fn test_sort_by_without_direction_is_ascending() {
        let state = QueryState { sort_by: Some("name".to_owned()), ..QueryState::default() };
        assert_eq!(state.sort(), Some(("name", false)));
    }

    #[test]
    fn test_text_search_is_trimmed_and_blank_is_absent() {
        assert_eq!(QueryState::default().with_text_search("  bob ").text_search(), Some("bob"));
        assert_eq!(QueryState::default().with_text_search("   ").text_search(), None);
    }

    #[test]
    fn test_scope_list_drops_blank_tokens() {
        assert_eq!(
            ScopeValue::list(["active", " ", "closed "]),
            Some(ScopeValue::List(vec!["active".to_owned(), "closed".to_owned()]))
        );
        assert_eq!(ScopeValue::list(["", " "]), None);
        assert_eq!(ScopeValue::single("  "), None);
    }

    #[test]
    fn test_scope_encode_joins_lists() {
        let value = ScopeValue::list(["a", "b"]).unwrap();
        assert_eq!(value.encode(), "a,b");
    }

    #[test]
    fn test_blank_search_update_clears() {
        assert_eq!(QueryUpdate::text_search("  ").text_search, Patch::Clear);
        assert_eq!(QueryUpdate::text_search(" x ").text_search, Patch::Set("x".to_owned()));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(QueryUpdate::default().is_empty());
        assert!(!QueryUpdate::page(2).is_empty());
        assert!(!QueryUpdate::clear_sort().is_empty());
    }

    #[test]
    fn test_patch_apply() {
        assert_eq!(Patch::Keep.apply(Some(1)), Some(1));
        assert_eq!(Patch::Set(2).apply(Some(1)), Some(2));
        assert_eq!(Patch::<i32>::Clear.apply(Some(1)), None);
    }
}
