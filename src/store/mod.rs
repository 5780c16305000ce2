//! Record store - keyed bin storage for transactions and feature records
//!
//! Records are addressed by a `namespace / set / key` triple and hold a
//! loosely-typed map of named bins. Two backends:
//!
//! - [`PgRecordStore`]: Postgres, bins kept as JSONB
//! - [`MemoryStore`]: in-process, for local runs and tests

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgRecordStore;

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Named bins of one record
pub type Bins = Map<String, Value>;

/// Record key. Integer and string keys never alias each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Int(i64),
    Str(String),
}

impl RecordKey {
    /// Short tag stored alongside the key value
    pub fn kind(&self) -> &'static str {
        match self {
            RecordKey::Int(_) => "int",
            RecordKey::Str(_) => "str",
        }
    }

    pub fn value(&self) -> String {
        match self {
            RecordKey::Int(v) => v.to_string(),
            RecordKey::Str(v) => v.clone(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(v) => write!(f, "{}", v),
            RecordKey::Str(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(v: i64) -> Self {
        RecordKey::Int(v)
    }
}

impl From<&str> for RecordKey {
    fn from(v: &str) -> Self {
        RecordKey::Str(v.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(v: String) -> Self {
        RecordKey::Str(v)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {namespace}/{set}/{key}")]
    NotFound {
        namespace: String,
        set: String,
        key: RecordKey,
    },

    #[error("store error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(namespace: &str, set: &str, key: &RecordKey) -> Self {
        StoreError::NotFound {
            namespace: namespace.to_string(),
            set: set.to_string(),
            key: key.clone(),
        }
    }
}

/// Shared, concurrently usable record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Merge `bins` into the record, creating it when absent.
    /// Bins not named in `bins` keep their stored value.
    async fn put(&self, namespace: &str, set: &str, key: &RecordKey, bins: &Bins) -> Result<(), StoreError>;

    /// Fetch all bins of a record
    async fn get(&self, namespace: &str, set: &str, key: &RecordKey) -> Result<Bins, StoreError>;

    /// Release pooled connections
    async fn close(&self) {}
}
