//! SQLite-backed store for stored files.

use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    Row,
};

use super::{KeyValueStore, StoreError, StoredFileEntry};

/// Entries are iterated in insertion order. Overwriting a key keeps its
/// position.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    pub async fn new(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new().filename(":memory:");

        // one connection, the database lives and dies with it
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> StoredFileEntry {
    StoredFileEntry::new(row.get::<String, _>("key"), row.get::<String, _>("value"))
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteStore {
    async fn entries(&self) -> Result<Vec<StoredFileEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT key, value FROM entries
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT value FROM entries WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO entries (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        tracing::debug!("stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM entries WHERE key = ?
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // LIKE would treat `_` in the prefix as a wildcard
    async fn list(&self, prefix: &str) -> Result<Vec<StoredFileEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT key, value FROM entries
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY id
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }
}
