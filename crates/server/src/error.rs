use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::coaching::CoachingError;
use thiserror::Error;
use utils::response::ApiResponse;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Coaching(#[from] CoachingError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            ApiError::Coaching(CoachingError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Coaching(CoachingError::AssessmentNotFound) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Coaching(CoachingError::TaskNotFound) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::Coaching(CoachingError::Database(e)) | ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Auth(e) => {
                tracing::debug!(error = %e, "Rejected request authentication");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
        };

        let response = ApiResponse::<()>::error(&message);
        (status_code, Json(response)).into_response()
    }
}
