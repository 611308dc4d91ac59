use axum::Json;
use axum::extract::{Query, State};
use std::sync::Arc;

use cdm_admin_core::{FetchParams, QueryParams, UserProfile};

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::ListingResponse;

/// Decodes address-bar parameters with the salesman view's codec, so
/// malformed values fall back to the view defaults instead of failing.
pub async fn list_salesmen(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ListingResponse<UserProfile>>, ApiError> {
    Ok(Json(fetch_salesman_listing(&state, &params).await?))
}

pub async fn fetch_salesman_listing(
    state: &AppState,
    params: &QueryParams,
) -> Result<ListingResponse<UserProfile>, ApiError> {
    let query = state.salesman_codec.decode(params);
    let canonical = state.salesman_codec.encode(&query);
    let result = state.salesmen.list_salesmen(&FetchParams::from(&query)).await?;
    Ok(ListingResponse::new(&query, result, canonical))
}
