use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A serialized record as it sits in a store slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPayload {
    pub schema_version: u32,
    /// JSON document; its meaning depends on `schema_version`.
    pub body: String,
    pub saved_at: DateTime<Utc>,
}

/// Key-value persistence for serialized results.
///
/// Each key holds at most one payload; `put` replaces whatever was there.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        payload: &StoredPayload,
    ) -> Result<(), StoreError>;

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<StoredPayload>, StoreError>;

    /// Removes the payload under `key`, or returns [`StoreError::NotFound`].
    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;
}
