//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::features::FeatureError;
use crate::scoring::ScoringError;
use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Inbound body is not a valid transaction
    #[error("invalid transaction: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    PredictionService(#[from] ScoringError),

    #[error(transparent)]
    MissingLabel(#[from] FeatureError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Storage(_) => "storage",
            AppError::PredictionService(_) => "prediction_service",
            AppError::MissingLabel(_) => "missing_label",
        }
    }

    pub fn status(&self) -> StatusCode {
        // Every pipeline failure is reported as a client error
        StatusCode::BAD_REQUEST
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!("Responding {} ({}): {}", self.status(), self.kind(), self);
        (self.status(), format!("{}\n", self)).into_response()
    }
}
