use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use chrono::Utc;
use services::services::dashboard::DashboardSummary;
use utils::response::ApiResponse;

use crate::{AppState, auth::AuthUser, error::ApiError};

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ResponseJson<ApiResponse<DashboardSummary>>, ApiError> {
    let summary = state
        .dashboard
        .summary(user.id, user.display_name.as_deref(), Utc::now().date_naive())
        .await?;
    Ok(ResponseJson(ApiResponse::success(summary)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
