use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{KeyValueStore, StoreError, StoredFileEntry};

/// In-process store, iterated in key order. Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn entries(&self) -> Result<Vec<StoredFileEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(key, value)| StoredFileEntry::new(key.clone(), value.clone()))
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}
