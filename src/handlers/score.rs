//! Transaction scoring handler

use axum::{body::Bytes, extract::State, http::StatusCode};

use crate::{AppResult, AppState};

/// Score and validate one transaction.
///
/// Accepts any method and content type. Success is an empty `200 OK`; the
/// outcome itself is only logged.
pub async fn score(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<StatusCode> {
    state.pipeline.run(&body).await?;
    Ok(StatusCode::OK)
}
