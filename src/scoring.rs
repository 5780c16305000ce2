//! Model serving client
//!
//! POSTs a single-row batch to the prediction endpoint and reduces the
//! returned probability to a binary label.

use std::fmt;
use std::time::Duration;

use crate::features::FeatureVector;
use crate::models::{PredictRequest, PredictResponse};

pub const FRAUD: &str = "1";
pub const NOT_FRAUD: &str = "0";

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("prediction service timed out after {0:?}")]
    Timeout(Duration),

    #[error("prediction service unreachable: {0}")]
    Transport(String),

    #[error("prediction service returned status {0}")]
    Status(u16),

    #[error("prediction response is not valid JSON: {0}")]
    Decode(String),

    #[error("prediction response must hold exactly one row with one output")]
    Shape,
}

impl ScoringError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScoringError::Timeout(_))
    }
}

/// Model decision for one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub probability: f64,
    pub label: &'static str,
}

impl Verdict {
    pub fn is_fraud(&self) -> bool {
        self.label == FRAUD
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_fraud() { "FRAUD" } else { "NOT FRAUD" })
    }
}

/// `"1"` only when the probability is strictly above the threshold
pub fn decide(probability: f64, threshold: f64) -> Verdict {
    let label = if probability > threshold { FRAUD } else { NOT_FRAUD };
    Verdict { probability, label }
}

/// Shared client for the prediction endpoint
#[derive(Debug, Clone)]
pub struct ScoringClient {
    url: String,
    threshold: f64,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl ScoringClient {
    /// Build a client whose every call is bounded by `timeout`
    /// (connect, send and body read together).
    pub fn new(url: impl Into<String>, threshold: f64, timeout: Duration) -> Result<Self, ScoringError> {
        // Model serving is an internal endpoint, never reached through a proxy
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| ScoringError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            threshold,
            timeout,
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score one feature vector
    pub async fn predict(&self, vector: &FeatureVector) -> Result<Verdict, ScoringError> {
        let request = PredictRequest {
            inputs: vec![vector.as_slice().to_vec()],
        };

        let response = self.http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!("Prediction service returned {}", status);
            return Err(ScoringError::Status(status));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let parsed: PredictResponse = serde_json::from_slice(&body)
            .map_err(|e| ScoringError::Decode(e.to_string()))?;
        let probability = parsed.single().ok_or(ScoringError::Shape)?;

        let verdict = decide(probability, self.threshold);
        tracing::info!("Prediction is {} (p={:.4})", verdict, probability);
        Ok(verdict)
    }

    fn classify(&self, err: reqwest::Error) -> ScoringError {
        if err.is_timeout() {
            ScoringError::Timeout(self.timeout)
        } else {
            ScoringError::Transport(err.to_string())
        }
    }
}
