use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::life_assessment::LifeAssessment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, auth::AuthUser, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SubmitAssessment {
    /// Keyed by category; each value must be a whole number between 1 and 10.
    #[ts(type = "Record<string, number>")]
    pub scores: Map<String, Value>,
}

/// GET /api/assessment
/// Latest assessment for the caller, or null before onboarding
pub async fn get_latest_assessment(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ResponseJson<ApiResponse<Option<LifeAssessment>>>, ApiError> {
    let assessment = state.coaching.latest_assessment(user.id).await?;
    Ok(ResponseJson(ApiResponse::success(assessment)))
}

/// POST /api/assessment
/// Save a new assessment and complete onboarding
pub async fn submit_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<axum::Json<SubmitAssessment>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<LifeAssessment>>, ApiError> {
    let axum::Json(payload) = payload?;
    let assessment = state
        .coaching
        .submit_assessment(user.id, &payload.scores)
        .await?;

    Ok(ResponseJson(ApiResponse::success_with_message(
        assessment,
        "Assessment saved successfully!",
    )))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/assessment",
        get(get_latest_assessment).post(submit_assessment),
    )
}
