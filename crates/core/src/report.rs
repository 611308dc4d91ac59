use std::fmt::Display;

use serde::Serialize;

use crate::constants::FETCH_FAILED_TITLE;

/// Payload handed to the toast collaborator. Formatting and rendering are
/// the collaborator's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub title: String,
    pub description: String,
}

impl ErrorReport {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into() }
    }

    pub fn fetch_failed(error: &impl Display) -> Self {
        Self::new(FETCH_FAILED_TITLE, error.to_string())
    }
}
