//! HTTP API server for cdm-admin.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod response_types;

use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use cdm_admin_core::{PageSize, QueryStringCodec};
use cdm_admin_service::ProfileService;
use cdm_admin_storage::traits::{ProfileStore, SalesmanStore};

pub use handlers::salesman::fetch_salesman_listing;
pub use response_types::{ListingResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Deduplicated profile lookups
    pub profiles: ProfileService,
    /// Backend of the salesman listing
    pub salesmen: Arc<dyn SalesmanStore>,
    /// Defaults and scope keys of the salesman view
    pub salesman_codec: QueryStringCodec,
}

impl AppState {
    /// One backend serving both profiles and the salesman listing.
    pub fn new<S>(storage: Arc<S>, default_page_size: PageSize) -> Self
    where
        S: ProfileStore + SalesmanStore + 'static,
    {
        let profiles: Arc<dyn ProfileStore> = storage.clone();
        Self {
            profiles: ProfileService::new(profiles),
            salesmen: storage,
            salesman_codec: QueryStringCodec::salesman(default_page_size),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/salesman", get(handlers::salesman::list_salesmen))
        .route("/api/users/{id}", get(handlers::users::get_user))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod test_support {
    use super::*;
    use cdm_admin_core::{QueryParams, UserProfile};
    use cdm_admin_storage::MemoryStorage;

    pub fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    /// Twelve salesmen `s00..s11`; even ids in `north`, odd in `south`.
    pub fn seeded_state() -> Arc<AppState> {
        let rows = (0..12)
            .map(|i| {
                UserProfile::new(format!("s{i:02}"), "salesman")
                    .with_name(format!("Rep {i:02}"))
                    .with_email(format!("rep{i:02}@example.com"))
                    .with_region(if i % 2 == 0 { "north" } else { "south" })
            })
            .collect();
        Arc::new(AppState::new(Arc::new(MemoryStorage::new(rows)), PageSize::Ten))
    }
}
