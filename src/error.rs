use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error surface shared by every handler. Each variant maps to one HTTP
/// status; the response body is always `{"message": ...}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("Database failure")]
    Database(#[from] sqlx::Error),
    #[error("Reservations service is unavailable")]
    Reservations(#[from] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Database(e) => {
                tracing::error!("Failed to execute query: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Reservations(e) => {
                tracing::error!("Reservations call failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
