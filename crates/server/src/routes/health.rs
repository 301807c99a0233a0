use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct HealthStatus {
    pub status: String,
    /// False when task generation is running on the static pool only.
    pub live_model: bool,
}

pub async fn health_check(State(state): State<AppState>) -> ResponseJson<ApiResponse<HealthStatus>> {
    ResponseJson(ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        live_model: state.live_model,
    }))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
