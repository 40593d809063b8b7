use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{ResultStoreFactory, StoreConfig};
use super::repository::{ResultStore, StoreError, StoredPayload};

/// Process-local [`ResultStore`]. Contents are lost when the store drops.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    slots: Mutex<HashMap<String, StoredPayload>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, HashMap<String, StoredPayload>>, StoreError> {
        self.slots
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn put(
        &self,
        key: &str,
        payload: &StoredPayload,
    ) -> Result<(), StoreError> {
        self.slots()?.insert(key.to_string(), payload.clone());
        Ok(())
    }

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<StoredPayload>, StoreError> {
        Ok(self.slots()?.get(key).cloned())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        self.slots()?
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Registers the `"memory"` backend.
pub struct MemoryResultStoreFactory;

#[async_trait]
impl ResultStoreFactory for MemoryResultStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn ResultStore>, StoreError> {
        Ok(Box::new(MemoryResultStore::new()))
    }
}
