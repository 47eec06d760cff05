use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::app::errors::ApiError;

/// `GET /`
pub async fn root() -> impl IntoResponse {
    Json(json!({"Hello": "World"}))
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Fallback for unregistered paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
