use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lvc_core::error::ProviderError;
use serde::Serialize;

use crate::routes::download::NOT_FOUND_MESSAGE;

/// Transport-level failures. Only the download route produces these; the
/// chat route always answers with a [`crate::analyze::ChatReply`].
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(msg) => {
                tracing::warn!("provider unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "repositório de documentos indisponível".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotFound { key } => {
                tracing::info!(%key, "document vanished after lookup");
                ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
            ProviderError::Unavailable(reason) => ApiError::Unavailable(reason),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
