//! Stored feature record model

use serde_json::Value;

pub use crate::store::Bins;

/// Bin names shared by transactions and feature records
pub mod bins {
    pub const USER_ID: &str = "UserID";
    pub const SET_NAME: &str = "set_name";
    pub const AMOUNT: &str = "AmountBin";
    pub const CLASS: &str = "ClassBin";
}

/// Feature record read back from the store.
///
/// Bins are loosely typed. Accessors never fail on a type mismatch: numeric
/// reads fall back to a caller-supplied default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredRecord {
    bins: Bins,
}

impl StoredRecord {
    pub fn new(bins: Bins) -> Self {
        Self { bins }
    }

    /// Numeric bin, or `default` when absent or not a number
    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.bins
            .get(name)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    /// Ground-truth classification, only when stored as a string
    pub fn label(&self) -> Option<&str> {
        self.bins.get(bins::CLASS).and_then(Value::as_str)
    }

    /// Number of stored bins
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}
