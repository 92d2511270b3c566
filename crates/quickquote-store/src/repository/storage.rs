//! # Key/Value Storage
//!
//! One `app_storage` row per key, value as JSON text. The typed
//! repositories sit on top of this.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Saved quotes, newest first.
pub const HISTORY_KEY: &str = "qq_history_v1";

/// The saved quote form.
pub const DRAFT_KEY: &str = "qq_draft_v2";

/// The material favorites catalogue.
pub const FAVORITES_KEY: &str = "qq_material_favorites_v1";

/// Repository for raw storage rows.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// The stored text for `key`, if any.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM app_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Inserts or replaces the text for `key`.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key, bytes = value.len(), "Writing storage row");

        sqlx::query(
            r#"
            INSERT INTO app_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Serializes `value` as JSON and stores it under `key`.
    pub async fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let text = serde_json::to_string(value)?;
        self.put(key, &text).await
    }

    /// Deletes `key`. Returns whether a row existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM app_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
