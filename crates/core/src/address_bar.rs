//! The address-bar collaborator the controller writes query parameters to.

use crate::codec::QueryParams;

/// Read/replace access to the current location's query parameters.
pub trait AddressBar {
    fn params(&self) -> QueryParams;

    /// Replaces the current history entry; never pushes a new one.
    fn replace(&mut self, params: QueryParams);
}

/// In-process address bar with a history stack.
#[derive(Debug, Clone)]
pub struct MemoryAddressBar {
    history: Vec<QueryParams>,
    replacements: usize,
}

impl Default for MemoryAddressBar {
    fn default() -> Self {
        Self::new(QueryParams::new())
    }
}

impl MemoryAddressBar {
    pub fn new(initial: QueryParams) -> Self {
        Self { history: vec![initial], replacements: 0 }
    }

    /// User navigation to a new location (link click, typed URL).
    pub fn push(&mut self, params: QueryParams) {
        self.history.push(params);
    }

    /// Browser "back". Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub const fn replacements(&self) -> usize {
        self.replacements
    }

    pub fn current(&self) -> &QueryParams {
        static EMPTY: QueryParams = QueryParams::new();
        self.history.last().unwrap_or(&EMPTY)
    }
}

impl AddressBar for MemoryAddressBar {
    fn params(&self) -> QueryParams {
        self.current().clone()
    }

    fn replace(&mut self, params: QueryParams) {
        if let Some(entry) = self.history.last_mut() {
            *entry = params;
        }
        self.replacements += 1;
    }
}
