//! SQLite snapshot store implementation
//!
//! One fixed slot, upserted on every save. The domain sequence is stored as
//! a JSON array, the timestamp as Rfc3339 text.

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;
use time::OffsetDateTime;

use tabtidy_domain::{Arrangement, SnapshotError, SnapshotStore, StoredArrangement};

const SNAPSHOT_SLOT: &str = "current";

/// SQLite-backed snapshot store
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Create a new SQLite snapshot store, initializing the database if needed
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let db_path = db_path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SnapshotError::Backend(format!("Failed to create directory: {}", e)))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect(&db_url)
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing)
    pub async fn in_memory() -> Result<Self, SnapshotError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), SnapshotError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS arrangement (
                slot TEXT PRIMARY KEY,
                domains TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> Result<Option<StoredArrangement>, SnapshotError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT domains, updated_at FROM arrangement WHERE slot = ?")
                .bind(SNAPSHOT_SLOT)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        match row {
            Some((domains_json, updated_at_str)) => {
                let domains: Vec<String> = serde_json::from_str(&domains_json)
                    .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

                let updated_at = OffsetDateTime::parse(
                    &updated_at_str,
                    &time::format_description::well_known::Rfc3339,
                )
                .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

                Ok(Some(StoredArrangement {
                    domains: Arrangement(domains),
                    updated_at,
                }))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, arrangement: &StoredArrangement) -> Result<(), SnapshotError> {
        let domains_json = serde_json::to_string(&arrangement.domains.0)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let updated_at_str = arrangement
            .updated_at
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO arrangement (slot, domains, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(slot) DO UPDATE SET
                domains = excluded.domains,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(SNAPSHOT_SLOT)
        .bind(&domains_json)
        .bind(&updated_at_str)
        .execute(&self.pool)
        .await
        .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        sqlx::query("DELETE FROM arrangement WHERE slot = ?")
            .bind(SNAPSHOT_SLOT)
            .execute(&self.pool)
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrangement(domains: &[&str]) -> StoredArrangement {
        StoredArrangement {
            domains: Arrangement(domains.iter().map(|d| d.to_string()).collect()),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn roundtrip() {
        let store = SqliteSnapshotStore::in_memory().await.unwrap();

        assert!(store.load().await.unwrap().is_none());

        store.save(&arrangement(&["a.com", "b.com"])).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.domains.0, vec!["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn save_overwrites_the_single_slot() {
        let store = SqliteSnapshotStore::in_memory().await.unwrap();

        store.save(&arrangement(&["a.com"])).await.unwrap();
        store.save(&arrangement(&["b.com", "c.com"])).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.domains.0, vec!["b.com", "c.com"]);
    }

    #[tokio::test]
    async fn clear_empties_the_slot() {
        let store = SqliteSnapshotStore::in_memory().await.unwrap();

        store.save(&arrangement(&["a.com"])).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_arrangement_roundtrips() {
        let store = SqliteSnapshotStore::in_memory().await.unwrap();

        store.save(&arrangement(&[])).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(loaded.domains.is_empty());
    }

    #[tokio::test]
    async fn persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state").join("tabtidy.sqlite");

        {
            let store = SqliteSnapshotStore::new(&db_path).await.unwrap();
            store.save(&arrangement(&["a.com"])).await.unwrap();
        }

        let store = SqliteSnapshotStore::new(&db_path).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.domains.0, vec!["a.com"]);
    }
}
