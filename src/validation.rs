//! Outcome validation - model verdict against the stored classification

/// Exact, case-sensitive label comparison
pub fn validate(ground_truth: &str, predicted: &str) -> bool {
    ground_truth == predicted
}

/// Result of comparing one prediction with its ground truth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub ground_truth: String,
    pub predicted: String,
    pub matched: bool,
}

impl ValidationOutcome {
    pub fn new(ground_truth: impl Into<String>, predicted: impl Into<String>) -> Self {
        let ground_truth = ground_truth.into();
        let predicted = predicted.into();
        let matched = validate(&ground_truth, &predicted);

        if matched {
            tracing::info!("Prediction {} DOES match the classification", predicted);
        } else {
            tracing::info!(
                "Prediction {} DOES NOT match the classification {}",
                predicted, ground_truth
            );
        }

        Self { ground_truth, predicted, matched }
    }
}
