//! Typed hand-off of a [`TaxResult`] from the calculator to the status view.
//!
//! The calculator publishes every fresh result into a single fixed slot; the
//! status view fetches it and gets either the result, an explicit empty
//! state, or the reason the stored record could not be used.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use super::repository::{ResultStore, StoreError, StoredPayload};
use crate::models::TaxResult;

/// Slot the calculator writes and the status view reads.
pub const RESULT_SLOT_KEY: &str = "taxCalculations";

/// Version written alongside every payload body.
pub const PAYLOAD_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("unsupported payload version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("stored result does not add up to its gross income")]
    Inconsistent,
}

/// Serializes a result into a payload stamped with the current version.
pub fn encode_result(
    result: &TaxResult,
    saved_at: DateTime<Utc>,
) -> Result<StoredPayload, PayloadError> {
    let body = serde_json::to_string(result).map_err(|e| PayloadError::Malformed(e.to_string()))?;
    Ok(StoredPayload {
        schema_version: PAYLOAD_SCHEMA_VERSION,
        body,
        saved_at,
    })
}

/// Parses and validates a stored payload.
pub fn decode_result(payload: &StoredPayload) -> Result<TaxResult, PayloadError> {
    if payload.schema_version != PAYLOAD_SCHEMA_VERSION {
        return Err(PayloadError::UnsupportedVersion {
            found: payload.schema_version,
            expected: PAYLOAD_SCHEMA_VERSION,
        });
    }

    let result: TaxResult =
        serde_json::from_str(&payload.body).map_err(|e| PayloadError::Malformed(e.to_string()))?;

    if result.taxable_income.is_sign_negative() && !result.taxable_income.is_zero() {
        return Err(PayloadError::Inconsistent);
    }
    if !result.is_balanced() {
        return Err(PayloadError::Inconsistent);
    }

    Ok(result)
}

/// What the status view finds in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffState {
    Ready {
        result: TaxResult,
        saved_at: DateTime<Utc>,
    },
    Empty,
    Invalid(PayloadError),
}

impl HandoffState {
    pub fn result(&self) -> Option<&TaxResult> {
        match self {
            Self::Ready { result, .. } => Some(result),
            Self::Empty | Self::Invalid(_) => None,
        }
    }
}

/// Reads and writes the result slot on top of any [`ResultStore`].
pub struct ResultHandoff<'a> {
    store: &'a dyn ResultStore,
    key: &'a str,
}

impl<'a> ResultHandoff<'a> {
    pub fn new(store: &'a dyn ResultStore) -> Self {
        Self {
            store,
            key: RESULT_SLOT_KEY,
        }
    }

    /// Replaces the slot with `result`.
    pub async fn publish(
        &self,
        result: &TaxResult,
    ) -> Result<(), StoreError> {
        let payload = encode_result(result, Utc::now())
            .map_err(|e| StoreError::Database(e.to_string()))?;
        self.store.put(self.key, &payload).await?;
        debug!(key = self.key, gross_income = %result.gross_income, "published result");
        Ok(())
    }

    /// Reads the slot; unusable records come back as [`HandoffState::Invalid`].
    pub async fn fetch(&self) -> Result<HandoffState, StoreError> {
        let Some(payload) = self.store.get(self.key).await? else {
            debug!(key = self.key, "no stored result");
            return Ok(HandoffState::Empty);
        };

        match decode_result(&payload) {
            Ok(result) => Ok(HandoffState::Ready {
                result,
                saved_at: payload.saved_at,
            }),
            Err(error) => {
                warn!(key = self.key, %error, "ignoring stored result");
                Ok(HandoffState::Invalid(error))
            }
        }
    }

    /// Empties the slot. Clearing an empty slot is not an error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match self.store.remove(self.key).await {
            Ok(()) | Err(StoreError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
