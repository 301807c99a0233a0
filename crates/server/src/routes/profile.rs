use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::profile::Profile;
use services::services::stores::ProfileStore;
use utils::response::ApiResponse;

use crate::{AppState, auth::AuthUser, error::ApiError};

/// GET /api/profile
/// Refreshes the stored identity from the token before returning the profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ResponseJson<ApiResponse<Profile>>, ApiError> {
    let profile = state
        .db
        .sync_identity(user.id, user.email.as_deref(), user.display_name.as_deref())
        .await?;
    Ok(ResponseJson(ApiResponse::success(profile)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}
