//! Column sort arrows and the header-click cycle.
//!
//! There is no per-column state: a column's order is derived on demand by
//! comparing its key with the single `sortBy`/`sortDesc` pair. A column is
//! only shown as sorted when both halves of the pair are present.

use serde::{Deserialize, Serialize};

use crate::query_state::{QueryState, QueryUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
    None,
}

impl SortOrder {
    /// Header-click transition: asc → desc → none → asc.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
            Self::None => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumnState {
    pub key: String,
    pub order: SortOrder,
}

/// Column and direction as shown in the header row.
fn displayed_sort(state: &QueryState) -> Option<(&str, bool)> {
    state.sort_by().zip(state.sort_desc())
}

pub fn derive_column_sort_order(column_key: &str, state: &QueryState) -> SortOrder {
    match displayed_sort(state) {
        Some((key, false)) if key == column_key => SortOrder::Asc,
        Some((key, true)) if key == column_key => SortOrder::Desc,
        _ => SortOrder::None,
    }
}

pub fn column_sort_state(column_key: &str, state: &QueryState) -> SortColumnState {
    SortColumnState {
        key: column_key.to_owned(),
        order: derive_column_sort_order(column_key, state),
    }
}

/// The active column, if any.
pub fn active_sort(state: &QueryState) -> Option<SortColumnState> {
    displayed_sort(state).map(|(key, descending)| SortColumnState {
        key: key.to_owned(),
        order: if descending { SortOrder::Desc } else { SortOrder::Asc },
    })
}

/// Update emitted when the header of `column_key` is clicked.
///
/// Another column being active counts as this one being unsorted, so a new
/// column always starts ascending. Descending clears the sort rather than
/// wrapping to ascending.
pub fn sort_cycle_update(column_key: &str, state: &QueryState) -> QueryUpdate {
    match derive_column_sort_order(column_key, state).next() {
        SortOrder::Asc => QueryUpdate::sort(column_key, false),
        SortOrder::Desc => QueryUpdate::sort(column_key, true),
        SortOrder::None => QueryUpdate::clear_sort(),
    }
}
