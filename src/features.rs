//! Feature Vector - model input assembled from a stored feature record
//!
//! Layout (fixed, 29 slots):
//!
//! ```text
//! [ v0, v1, ..., v27, ln(AmountBin) ]
//!   └── components ──┘  └─ slot 28 ─┘
//! ```
//!
//! Component bins that are absent or not numeric read as `0.0`. Only a
//! missing ground-truth label is an error.

use serde::{Deserialize, Serialize};

use crate::models::{bins, StoredRecord};

/// Total number of model inputs
pub const FEATURE_COUNT: usize = 29;

/// Number of principal-component inputs (`v0`..`v27`)
pub const COMPONENT_COUNT: usize = FEATURE_COUNT - 1;

/// Slot holding the log-transformed amount
pub const AMOUNT_SLOT: usize = FEATURE_COUNT - 1;

/// Value used for any numeric bin that is absent or not a number
pub const DEFAULT_VALUE: f64 = 0.0;

/// Component bin names, in slot order
pub const COMPONENT_BINS: [&str; COMPONENT_COUNT] = [
    "v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7", "v8", "v9",
    "v10", "v11", "v12", "v13", "v14", "v15", "v16", "v17", "v18", "v19",
    "v20", "v21", "v22", "v23", "v24", "v25", "v26", "v27",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("stored record has no usable {} label", bins::CLASS)]
    MissingLabel,
}

/// Dense model input, always exactly [`FEATURE_COUNT`] values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Component slots only
    pub fn components(&self) -> &[f64] {
        &self.0[..COMPONENT_COUNT]
    }

    pub fn log_amount(&self) -> f64 {
        self.0[AMOUNT_SLOT]
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self([DEFAULT_VALUE; FEATURE_COUNT])
    }
}

/// Output of [`extract`]: the stored label and the vector to score
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub ground_truth: String,
    pub vector: FeatureVector,
}

/// Natural log of the amount.
///
/// `ln` is undefined for zero, negative and non-finite amounts (which includes
/// an absent amount defaulted to zero). Those map to `0.0`, the value `ln(1)`
/// would give.
pub fn log_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount.ln()
    } else {
        DEFAULT_VALUE
    }
}

/// Build the label and feature vector for a stored record
pub fn extract(record: &StoredRecord) -> Result<Extracted, FeatureError> {
    let ground_truth = record.label().ok_or(FeatureError::MissingLabel)?.to_string();

    let mut values = [DEFAULT_VALUE; FEATURE_COUNT];
    for (slot, name) in values.iter_mut().zip(COMPONENT_BINS.iter()) {
        *slot = record.number_or(name, DEFAULT_VALUE);
    }

    let amount = record.number_or(bins::AMOUNT, DEFAULT_VALUE);
    values[AMOUNT_SLOT] = log_amount(amount);
    if !(amount.is_finite() && amount > 0.0) {
        tracing::debug!("Amount {} has no logarithm, using {}", amount, DEFAULT_VALUE);
    }

    tracing::trace!("Extracted {} features from {} bins", FEATURE_COUNT, record.bin_count());

    Ok(Extracted {
        ground_truth,
        vector: FeatureVector(values),
    })
}
