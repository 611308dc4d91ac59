use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use cdm_admin_core::UserProfile;

use crate::AppState;
use crate::api_error::ApiError;

/// Concurrent requests for the same id share one backend lookup.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.profiles.require_profile(&id).await?))
}
