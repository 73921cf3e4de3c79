use crate::models::LedgerError;
use crate::storage::Storage;
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local storage, used when nothing needs to outlive the run.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
