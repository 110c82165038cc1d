//! In-memory state store adapter.
//!
//! Backs ephemeral sessions and tests: same contract as the durable
//! adapter, no filesystem. State dies with the process.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::ports::{StateKey, StateStore, StateStoreError};

/// Volatile state store keyed in memory.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    records: Mutex<HashMap<StateKey, String>>,
}

impl StateStore for InMemoryStateStore {
    fn load(&self, key: StateKey) -> Result<Option<String>, StateStoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StateStoreError::backend("state mutex poisoned"))?;
        Ok(records.get(&key).cloned())
    }

    fn save(&self, key: StateKey, contents: &str) -> Result<(), StateStoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StateStoreError::backend("state mutex poisoned"))?;
        records.insert(key, contents.to_owned());
        Ok(())
    }
}
