//! Service layer for cdm-admin
//!
//! Sits between the HTTP/CLI surfaces and storage: the listing view model,
//! deduplicated profile lookups and the session-driven auth state.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod auth;
mod dedup_cache;
pub mod error;
mod listing;
mod profile_service;

pub use auth::AuthState;
pub use dedup_cache::{DedupError, PendingResult, RequestDedupCache};
pub use error::ServiceError;
pub use listing::{
    ErrorReporter, FetchTicket, ListingPhase, ListingSource, ListingView, SalesmanListing,
    TracingReporter,
};
pub use profile_service::ProfileService;
