use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json as ResponseJson,
    routing::{get, post},
};
use chrono::Utc;
use db::models::daily_task::DailyTask;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use services::services::coaching::{CoachedUser, completion_message};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, auth::AuthUser, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskCompletion {
    pub task_id: Uuid,
    pub completed: bool,
}

/// POST /api/tasks/generate
/// Generate today's three tasks from the latest assessment
pub async fn generate_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ResponseJson<ApiResponse<Vec<DailyTask>>>, ApiError> {
    let coached = CoachedUser {
        id: user.id,
        display_name: user.display_name,
    };
    let mut rng = StdRng::from_entropy();
    let tasks = state
        .coaching
        .generate_daily_tasks(&coached, Utc::now().date_naive(), &mut rng)
        .await?;

    let message = format!("Generated {} personalized tasks for you!", tasks.len());
    Ok(ResponseJson(ApiResponse::success_with_message(tasks, message)))
}

/// GET /api/tasks
pub async fn get_today_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ResponseJson<ApiResponse<Vec<DailyTask>>>, ApiError> {
    let tasks = state
        .coaching
        .tasks_for_day(user.id, Utc::now().date_naive())
        .await?;
    Ok(ResponseJson(ApiResponse::success(tasks)))
}

/// PATCH /api/tasks
pub async fn update_task_completion(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<axum::Json<UpdateTaskCompletion>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<DailyTask>>, ApiError> {
    let axum::Json(payload) = payload.map_err(|_| {
        ApiError::BadRequest(
            "Invalid request. taskId and completed (boolean) are required.".to_string(),
        )
    })?;

    let task = state
        .coaching
        .set_task_completion(user.id, payload.task_id, payload.completed)
        .await?;

    Ok(ResponseJson(ApiResponse::success_with_message(
        task,
        completion_message(payload.completed),
    )))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/tasks", get(get_today_tasks).patch(update_task_completion))
        .route("/tasks/generate", post(generate_tasks))
}
