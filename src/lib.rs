//! Fraud Scoring Service
//!
//! Accepts a transaction, enriches it with the user's stored feature record,
//! scores it against a model serving endpoint and checks the verdict against
//! the stored ground truth.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      FRAUD SCORING                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /  ──►  Pipeline                                      │
//! │               ├─ accept    ──► RecordStore.put (seller id)  │
//! │               ├─ enrich    ──► RecordStore.get (user id)    │
//! │               │               └─ features::extract          │
//! │               ├─ predict   ──► ScoringClient ──► model      │
//! │               └─ validate  ──► ValidationOutcome            │
//! │                                                             │
//! │  RecordStore: PgRecordStore (JSONB bins) | MemoryStore      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod store;
pub mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<pipeline::Pipeline>,
    pub config: config::Config,
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::score::score))
        .route("/health", get(handlers::health::check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
