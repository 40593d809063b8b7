use async_trait::async_trait;

use paye_core::store::{ResultStore, ResultStoreFactory, StoreConfig, StoreError};

use crate::repository::SqliteResultStore;

/// [`ResultStoreFactory`] for SQLite.
///
/// Register this with a [`paye_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use paye_core::store::StoreRegistry;
/// use paye_store_sqlite::SqliteResultStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteResultStoreFactory));
/// ```
pub struct SqliteResultStoreFactory;

#[async_trait]
impl ResultStoreFactory for SqliteResultStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted values:
    /// * A file path or `sqlite:` URL, e.g. `"paye.db"`. The file is created
    ///   if it does not exist.
    /// * `":memory:"`, an ephemeral database (useful for tests).
    ///
    /// Migrations run on every open.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ResultStore>, StoreError> {
        let store = SqliteResultStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }

    /// Open the database only if the file is already there.
    ///
    /// `":memory:"` has no file, so it behaves like [`create`](Self::create).
    async fn open_existing(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ResultStore>, StoreError> {
        if config.connection_string.contains(":memory:") {
            return self.create(config).await;
        }
        let store = SqliteResultStore::open_existing(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}
