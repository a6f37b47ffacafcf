use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request body could not be read as the expected JSON shape.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller could not be authenticated (missing or invalid token).
    #[error("Unauthenticated: {0}")]
    Unauthenticated(&'static str),

    /// The caller is authenticated but does not own the target record.
    #[error("Not authorized")]
    NotAuthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            AppError::NotAuthorized => (StatusCode::UNAUTHORIZED, "Not authorized".to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                return server_error();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                return server_error();
            }
        };

        (status, Json(json!({ "msg": message }))).into_response()
    }
}

/// Opaque 500: no internal detail reaches the caller.
fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
}
