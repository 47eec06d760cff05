use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, FormRejection, RawPathParamsRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use fieldcheck_core::ValidationErrors;

/// Every way a request can fail before or inside a handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields violated their declared shape.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The body framing itself was unreadable (e.g. broken multipart).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An axum extractor refused the request with its own status.
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}

/// Broken multipart framing is a bad request; anything else (e.g. the body
/// limit) keeps the status axum assigns it.
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::BAD_REQUEST {
            Self::BadRequest(err.body_text())
        } else {
            Self::Rejected(status, err.body_text())
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    Self::Rejected(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(
    BytesRejection,
    FormRejection,
    MultipartRejection,
    RawPathParamsRejection,
);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(violations = errors.len(), "request validation failed: {errors}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    axum::Json(json!({
                        "error": "validation_error",
                        "message": "request validation failed",
                        "detail": errors,
                    })),
                )
                    .into_response()
            }
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Rejected(status, msg) => json_error(status, "rejected", msg),
            ApiError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "unhandled internal error");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error",
                )
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
