//! Scoring pipeline
//!
//! One request walks a fixed sequence of stages:
//!
//! ```text
//! Received ─► Persisted ─► Enriched ─► Predicted ─► Validated ─► Done
//!     │           │            │            │
//!     └───────────┴────────────┴────────────┴──► Error (request ends)
//! ```
//!
//! - Persisted: the raw transaction is written under its seller id
//! - Enriched: the feature record is read under the user id
//! - Predicted: the model scores the feature vector
//! - Validated: the verdict is compared with the stored label
//!
//! The first failing stage ends the request. Nothing is retried.


use std::fmt;
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::features::{self, Extracted};
use crate::models::{IncomingTransaction, StoredRecord};
use crate::scoring::ScoringClient;
use crate::store::RecordStore;
use crate::validation::ValidationOutcome;

/// Request lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Persisted,
    Enriched,
    Predicted,
    Validated,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Persisted => "persisted",
            Stage::Enriched => "enriched",
            Stage::Predicted => "predicted",
            Stage::Validated => "validated",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Shared across all requests; holds the store and the model client
pub struct Pipeline {
    store: Arc<dyn RecordStore>,
    scorer: ScoringClient,
    namespace: String,
    set_name: String,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn RecordStore>,
        scorer: ScoringClient,
        namespace: impl Into<String>,
        set_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            scorer,
            namespace: namespace.into(),
            set_name: set_name.into(),
        }
    }

    /// Decode the inbound transaction and persist its stored subset
    pub async fn accept(&self, body: &[u8]) -> AppResult<IncomingTransaction> {
        let txn = IncomingTransaction::from_slice(body)?;

        let bins = txn.to_bins(&self.set_name);
        self.store
            .put(&self.namespace, &self.set_name, &txn.seller_key(), &bins)
            .await?;

        Ok(txn)
    }

    /// Read the user's feature record and build the model input
    pub async fn enrich(&self, txn: &IncomingTransaction) -> AppResult<Extracted> {
        let bins = self.store
            .get(&self.namespace, &self.set_name, &txn.user_key())
            .await?;

        Ok(features::extract(&StoredRecord::new(bins))?)
    }

    /// Run every stage for one inbound body
    pub async fn run(&self, body: &[u8]) -> AppResult<ValidationOutcome> {
        let span = tracing::info_span!(
            "score",
            request_id = %Uuid::new_v4(),
            user_id = tracing::field::Empty,
            seller_id = tracing::field::Empty,
        );

        async move {
            let mut stage = Stage::Received;
            let result = self.run_stages(body, &mut stage).await;
            if let Err(err) = &result {
                tracing::warn!("Pipeline failed after stage {}: {}", stage, err);
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, body: &[u8], stage: &mut Stage) -> AppResult<ValidationOutcome> {
        let txn = self.accept(body).await?;
        let span = tracing::Span::current();
        span.record("user_id", txn.user_id.as_str());
        span.record("seller_id", txn.seller_id);
        advance(stage, Stage::Persisted);

        let extracted = self.enrich(&txn).await?;
        advance(stage, Stage::Enriched);

        let verdict = self.scorer.predict(&extracted.vector).await?;
        advance(stage, Stage::Predicted);

        let outcome = ValidationOutcome::new(extracted.ground_truth, verdict.label);
        advance(stage, Stage::Validated);

        advance(stage, Stage::Done);
        Ok(outcome)
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!("Stage {} -> {}", stage, next);
    *stage = next;
}
