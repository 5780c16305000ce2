//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::StoreBackend;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: &'static str,
    scoring_url: String,
    fraud_threshold: f64,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.config.store_backend {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        store,
        scoring_url: state.config.scoring_url.clone(),
        fraud_threshold: state.config.fraud_threshold,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
