use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use lvc_core::models::document::{ProviderStatus, Retrieval};
use lvc_core::models::term::SearchTerm;
use lvc_core::resolver;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Arquivo não encontrado";

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub filename: String,
}

/// Serve the PDF named by `filename`: bytes from the local backend, a
/// redirect to a presigned URL from S3.
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let term = SearchTerm::parse(&query.filename)
        .map_err(|_| ApiError::BadRequest("filename is required".to_string()))?;

    let candidates = state.provider.find(&term).await;
    if let ProviderStatus::Unavailable(reason) = candidates.status() {
        return Err(ApiError::Unavailable(reason.clone()));
    }

    let doc = resolver::select_for_download(&term, candidates.into_documents())
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    tracing::info!(document = %doc.name, backend = state.provider.backend(), "serving download");

    let response = match state.provider.retrieval(&doc).await? {
        Retrieval::Bytes(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, content_disposition(&doc.name)),
            ],
            bytes,
        )
            .into_response(),
        Retrieval::Redirect(url) => Redirect::temporary(&url).into_response(),
    };

    Ok(response)
}

/// `attachment` header value with characters that would break the quoted
/// filename replaced.
fn content_disposition(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
