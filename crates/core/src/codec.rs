//! Conversion between [`QueryState`] and flat address-bar parameters.
//!
//! Encoding omits every field equal to the view's default so the common case
//! leaves the address bar empty. Decoding is total: a malformed value falls
//! back to the default for that field only.

use std::collections::BTreeMap;

use crate::constants::{
    LIST_SEPARATOR, PARAM_COMPANY_ID, PARAM_PAGE, PARAM_PAGE_SIZE, PARAM_SORT_BY,
    PARAM_REGION, PARAM_ROLE, PARAM_SORT_DESC, PARAM_STATUS, PARAM_TEXT_SEARCH,
};
use crate::query_state::{PageSize, QueryState, ScopeFilters, ScopeValue, non_empty};

/// Address-bar parameters. Values are raw strings; a missing key means
/// "use the default", never "use empty".
pub type QueryParams = BTreeMap<String, String>;

/// How a scope parameter is written in the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Single,
    /// Comma-joined tokens.
    List,
}

impl ScopeKind {
    pub fn parse(self, raw: &str) -> Option<ScopeValue> {
        match self {
            Self::Single => ScopeValue::single(raw),
            Self::List => ScopeValue::list(raw.split(LIST_SEPARATOR)),
        }
    }
}

/// Scope parameters a view understands. Unknown keys are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSchema {
    keys: BTreeMap<String, ScopeKind>,
}

impl ScopeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// `companyId` (single) and `status` (list).
    pub fn standard() -> Self {
        Self::new().with(PARAM_COMPANY_ID, ScopeKind::Single).with(PARAM_STATUS, ScopeKind::List)
    }

    /// `region` (single) and `role` (list), read by the salesman listing.
    pub fn salesman() -> Self {
        Self::new().with(PARAM_REGION, ScopeKind::Single).with(PARAM_ROLE, ScopeKind::List)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, kind: ScopeKind) -> Self {
        self.keys.insert(key.into(), kind);
        self
    }

    pub fn kind(&self, key: &str) -> Option<ScopeKind> {
        self.keys.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ScopeKind)> {
        self.keys.iter().map(|(key, kind)| (key.as_str(), *kind))
    }
}

/// Per-view codec: the view's defaults plus the scope keys it reads.
///
/// A view may only default its page size. Sort, search and scope always
/// default to absent, so clearing one of them still round-trips through an
/// address bar that omits default values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStringCodec {
    defaults: QueryState,
    schema: ScopeSchema,
}

impl Default for QueryStringCodec {
    fn default() -> Self {
        Self::new(PageSize::default(), ScopeSchema::standard())
    }
}

impl QueryStringCodec {
    pub fn new(page_size: PageSize, schema: ScopeSchema) -> Self {
        Self { defaults: QueryState::default().with_page_size(page_size), schema }
    }

    /// Salesman listing with the given default page size.
    pub fn salesman(page_size: PageSize) -> Self {
        Self::new(page_size, ScopeSchema::salesman())
    }

    pub const fn defaults(&self) -> &QueryState {
        &self.defaults
    }

    pub const fn schema(&self) -> &ScopeSchema {
        &self.schema
    }

    pub fn encode(&self, state: &QueryState) -> QueryParams {
        let defaults = &self.defaults;
        let mut params = QueryParams::new();

        if state.page != defaults.page {
            params.insert(PARAM_PAGE.to_owned(), state.page.to_string());
        }
        if state.page_size != defaults.page_size {
            params.insert(PARAM_PAGE_SIZE.to_owned(), state.page_size.to_string());
        }
        if let Some(sort_by) = differing(&state.sort_by, &defaults.sort_by) {
            params.insert(PARAM_SORT_BY.to_owned(), sort_by.clone());
        }
        if let Some(desc) = differing(&state.sort_desc, &defaults.sort_desc) {
            params.insert(PARAM_SORT_DESC.to_owned(), desc.to_string());
        }
        if let Some(term) = differing(&state.text_search, &defaults.text_search) {
            params.insert(PARAM_TEXT_SEARCH.to_owned(), term.clone());
        }
        for (key, value) in &state.scope {
            if defaults.scope.get(key) != Some(value) {
                params.insert(key.clone(), value.encode());
            }
        }

        params
    }

    pub fn decode(&self, params: &QueryParams) -> QueryState {
        let defaults = &self.defaults;

        let page = field(params, PARAM_PAGE, parse_page).unwrap_or(defaults.page);
        let page_size =
            field(params, PARAM_PAGE_SIZE, parse_page_size).unwrap_or(defaults.page_size);
        let sort_by = field(params, PARAM_SORT_BY, non_empty).or_else(|| defaults.sort_by.clone());
        let sort_desc = field(params, PARAM_SORT_DESC, parse_bool).or(defaults.sort_desc);
        let text_search =
            field(params, PARAM_TEXT_SEARCH, non_empty).or_else(|| defaults.text_search.clone());

        let mut scope = ScopeFilters::new();
        for (key, kind) in self.schema.iter() {
            let value = field(params, key, |raw| kind.parse(raw))
                .or_else(|| defaults.scope.get(key).cloned());
            if let Some(value) = value {
                scope.insert(key.to_owned(), value);
            }
        }

        QueryState { page, page_size, sort_by, sort_desc, text_search, scope }
    }
}

/// Encodes against [`QueryState::default`] with the standard scope keys.
pub fn encode(state: &QueryState) -> QueryParams {
    QueryStringCodec::default().encode(state)
}

/// Decodes with the standard scope keys, falling back to `defaults`.
pub fn decode(params: &QueryParams, defaults: &QueryState) -> QueryState {
    QueryStringCodec { defaults: defaults.clone(), schema: ScopeSchema::standard() }.decode(params)
}

fn differing<'a, T: PartialEq>(value: &'a Option<T>, default: &Option<T>) -> Option<&'a T> {
    value.as_ref().filter(|_| value != default)
}

/// Parses a present key; a malformed value is logged and reported as `None`.
fn field<T>(params: &QueryParams, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = params.get(key)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::debug!(key, value = %raw, "malformed query parameter, using default");
    }
    parsed
}

fn parse_page(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|page| *page >= 1)
}

fn parse_page_size(raw: &str) -> Option<PageSize> {
    raw.parse::<u32>().ok().and_then(PageSize::from_value)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    fn populated_state() -> QueryState {
        QueryState::default()
            .with_page(4)
            .with_page_size(PageSize::Fifty)
            .with_sort("email", true)
            .with_text_search("jane")
            .with_scope(PARAM_COMPANY_ID, ScopeValue::single("c-17").unwrap())
            .with_scope(PARAM_STATUS, ScopeValue::list(["active", "pending"]).unwrap())
    }

    #[test]
    fn test_default_state_encodes_to_nothing() {
        assert!(encode(&QueryState::default()).is_empty());
    }

    #[test]
    fn test_encode_writes_every_non_default_field() {
        let encoded = encode(&populated_state());
        assert_eq!(
            encoded,
            params(&[
                ("page", "4"),
                ("pageSize", "50"),
                ("sortBy", "email"),
                ("sortDesc", "true"),
                ("textSearch", "jane"),
                ("companyId", "c-17"),
                ("status", "active,pending"),
            ])
        );
    }

    #[test]
    fn test_encode_keeps_explicit_ascending_direction() {
        let encoded = encode(&QueryState::default().with_sort("name", false));
        assert_eq!(encoded.get("sortDesc").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_encode_never_writes_default_values() {
        let defaults = QueryState::default();
        let states = [
            QueryState::default().with_page(1),
            QueryState::default().with_page_size(PageSize::Ten),
            QueryState::default().with_text_search("  "),
            populated_state(),
        ];
        for state in &states {
            let encoded = encode(state);
            assert_ne!(encoded.get("page"), Some(&defaults.page().to_string()));
            assert_ne!(encoded.get("pageSize"), Some(&defaults.page_size().to_string()));
        }
    }

    #[test]
    fn test_round_trip_populated_state() {
        let state = populated_state();
        assert_eq!(decode(&encode(&state), &QueryState::default()), state);
    }

    #[test]
    fn test_round_trip_single_field_states() {
        let states = [
            QueryState::default().with_page(9),
            QueryState::default().with_page_size(PageSize::Hundred),
            QueryState::default().with_sort("name", false),
            QueryState::default().with_sort_desc(Some(true)),
            QueryState::default().with_text_search("a b"),
            QueryState::default().with_scope(PARAM_STATUS, ScopeValue::list(["x"]).unwrap()),
        ];
        for state in states {
            assert_eq!(decode(&encode(&state), &QueryState::default()), state);
        }
    }

    #[test]
    fn test_round_trip_against_view_defaults() {
        let codec = QueryStringCodec::new(PageSize::TwentyFive, ScopeSchema::standard());
        let defaults = codec.defaults().clone();
        let state = defaults.clone().with_page_size(PageSize::Ten).with_page(2);
        let encoded = codec.encode(&state);
        assert_eq!(encoded.get("pageSize").map(String::as_str), Some("10"));
        assert_eq!(codec.decode(&encoded), state);
        assert!(codec.encode(&defaults).is_empty());
    }

    #[test]
    fn test_view_round_trip_through_sort_cycle() {
        let codec = QueryStringCodec::salesman(PageSize::TwentyFive);
        let states = [
            codec.defaults().clone().with_sort("name", false),
            codec.defaults().clone().with_sort("name", true),
            codec.defaults().clone().with_page(3),
            codec.defaults().clone(),
        ];
        for state in states {
            assert_eq!(codec.decode(&codec.encode(&state)), state);
        }
    }

    #[test]
    fn test_view_defaults_carry_only_page_size() {
        let defaults = QueryStringCodec::salesman(PageSize::Fifty).defaults().clone();
        assert_eq!(defaults, QueryState::default().with_page_size(PageSize::Fifty));
    }

    #[test]
    fn test_decode_absent_keys_use_defaults() {
        let defaults = QueryState::default().with_page_size(PageSize::Fifty).with_sort("name", false);
        let decoded = decode(&params(&[("page", "3")]), &defaults);
        assert_eq!(decoded.page(), 3);
        assert_eq!(decoded.page_size(), PageSize::Fifty);
        assert_eq!(decoded.sort(), Some(("name", false)));
    }

    #[test]
    fn test_decode_malformed_page_falls_back_per_field() {
        let decoded = decode(
            &params(&[("page", "abc"), ("textSearch", "kim")]),
            &QueryState::default().with_page(2),
        );
        assert_eq!(decoded.page(), 2);
        assert_eq!(decoded.text_search(), Some("kim"));
    }

    #[test]
    fn test_decode_rejects_zero_and_negative_pages() {
        for raw in ["0", "-1", "2.5", ""] {
            let decoded = decode(&params(&[("page", raw)]), &QueryState::default());
            assert_eq!(decoded.page(), 1, "page {raw:?}");
        }
    }

    #[test]
    fn test_decode_page_size_outside_set_is_replaced_not_clamped() {
        for raw in ["30", "1000", "0", "9", "ten"] {
            let decoded = decode(&params(&[("pageSize", raw)]), &QueryState::default());
            assert_eq!(decoded.page_size(), PageSize::Ten, "pageSize {raw:?}");
        }
        let decoded = decode(&params(&[("pageSize", "25")]), &QueryState::default());
        assert_eq!(decoded.page_size(), PageSize::TwentyFive);
    }

    #[test]
    fn test_decode_sort_desc_requires_exact_literal() {
        let defaults = QueryState::default();
        assert_eq!(decode(&params(&[("sortDesc", "true")]), &defaults).sort_desc(), Some(true));
        assert_eq!(decode(&params(&[("sortDesc", "false")]), &defaults).sort_desc(), Some(false));
        assert_eq!(decode(&params(&[("sortDesc", "TRUE")]), &defaults).sort_desc(), None);
        assert_eq!(decode(&params(&[("sortDesc", "1")]), &defaults).sort_desc(), None);
    }

    #[test]
    fn test_decode_splits_status_list() {
        let decoded = decode(&params(&[("status", "open,,closed")]), &QueryState::default());
        assert_eq!(
            decoded.scope_value("status"),
            Some(&ScopeValue::List(vec!["open".to_owned(), "closed".to_owned()]))
        );
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let decoded = decode(&params(&[("utm_source", "mail")]), &QueryState::default());
        assert_eq!(decoded, QueryState::default());
    }

    #[test]
    fn test_custom_schema_reads_its_own_keys() {
        let schema = ScopeSchema::new().with("region", ScopeKind::Single);
        let codec = QueryStringCodec::new(PageSize::default(), schema);
        let decoded = codec.decode(&params(&[("region", "north"), ("companyId", "c-1")]));
        assert_eq!(decoded.scope_value("region"), ScopeValue::single("north").as_ref());
        assert!(decoded.scope_value("companyId").is_none());
    }

    #[test]
    fn test_salesman_view_reads_region_and_roles() {
        let codec = QueryStringCodec::salesman(PageSize::TwentyFive);
        let state = codec.decode(&params(&[
            ("region", "north"),
            ("role", "salesman,manager"),
            ("companyId", "ignored"),
        ]));
        assert_eq!(state.page_size(), PageSize::TwentyFive);
        assert_eq!(state.scope_value(PARAM_REGION), ScopeValue::single("north").as_ref());
        assert!(state.scope_value(PARAM_COMPANY_ID).is_none());
        assert_eq!(
            codec.encode(&state),
            params(&[("region", "north"), ("role", "salesman,manager")])
        );
    }
}
