use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;

use paye_core::store::{ResultStore, StoreError, StoredPayload};

pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    /// Connects to `connection_string`, creating the database file if needed.
    pub async fn new(connection_string: &str) -> Result<Self> {
        Self::connect(connection_string, true).await
    }

    /// Connects to an existing database. A missing file is an error and is
    /// not created.
    pub async fn open_existing(connection_string: &str) -> Result<Self> {
        Self::connect(connection_string, false).await
    }

    async fn connect(
        connection_string: &str,
        create_if_missing: bool,
    ) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .with_context(|| format!("Invalid SQLite connection string: {}", connection_string))?
            .create_if_missing(create_if_missing);

        // Every connection to an in-memory database sees its own empty
        // database, so keep the pool to one.
        let max_connections = if connection_string.contains(":memory:") {
            1
        } else {
            4
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", connection_string))?;

        debug!(%connection_string, create_if_missing, "opened sqlite result store");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_payload(row: &SqliteRow) -> Result<StoredPayload, StoreError> {
    let schema_version: i64 = row
        .try_get("schema_version")
        .map_err(|e| StoreError::Database(e.to_string()))?;
    let schema_version = u32::try_from(schema_version).map_err(|_| {
        StoreError::Database(format!("Invalid schema version: {}", schema_version))
    })?;

    Ok(StoredPayload {
        schema_version,
        body: row
            .try_get("body")
            .map_err(|e| StoreError::Database(e.to_string()))?,
        saved_at: row
            .try_get::<DateTime<Utc>, _>("saved_at")
            .map_err(|e| StoreError::Database(format!("Failed to get saved_at: {}", e)))?,
    })
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn put(
        &self,
        key: &str,
        payload: &StoredPayload,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO result_slots (slot_key, schema_version, body, saved_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(slot_key) DO UPDATE SET
                schema_version = excluded.schema_version,
                body = excluded.body,
                saved_at = excluded.saved_at",
        )
        .bind(key)
        .bind(i64::from(payload.schema_version))
        .bind(&payload.body)
        .bind(payload.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<StoredPayload>, StoreError> {
        let row = sqlx::query(
            "SELECT schema_version, body, saved_at FROM result_slots WHERE slot_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.as_ref().map(row_to_payload).transpose()
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM result_slots WHERE slot_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
