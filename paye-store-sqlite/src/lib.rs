//! SQLite backend for [`paye_core::ResultStore`].

mod factory;
mod repository;

pub use factory::SqliteResultStoreFactory;
pub use repository::SqliteResultStore;
