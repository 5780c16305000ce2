//! In-process record store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Bins, RecordKey, RecordStore, StoreError};

type Slot = (String, String, RecordKey);

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Slot, Bins>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(&self, namespace: &str, set: &str, key: &RecordKey, bins: &Bins) -> Result<(), StoreError> {
        let slot = (namespace.to_string(), set.to_string(), key.clone());
        let mut records = self.records.write();
        let record = records.entry(slot).or_default();
        for (name, value) in bins {
            record.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn get(&self, namespace: &str, set: &str, key: &RecordKey) -> Result<Bins, StoreError> {
        let slot = (namespace.to_string(), set.to_string(), key.clone());
        self.records
            .read()
            .get(&slot)
            .cloned()
            .ok_or_else(|| StoreError::not_found(namespace, set, key))
    }
}
