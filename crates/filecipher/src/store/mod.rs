mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A key and its stored download reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFileEntry {
    pub key: String,
    pub value: String,
}

impl StoredFileEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key without `prefix`, if it carries it.
    pub fn name(&self, prefix: &str) -> Option<&str> {
        self.key.strip_prefix(prefix)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key/value storage.
///
/// Iteration order is up to the backend but stable for a given store.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Every entry, in store order.
    async fn entries(&self) -> Result<Vec<StoredFileEntry>, StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns whether the key existed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// Entries whose key starts with `prefix`, in store order.
    async fn list(&self, prefix: &str) -> Result<Vec<StoredFileEntry>, StoreError> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .filter(|entry| entry.key.starts_with(prefix))
            .collect())
    }
}
