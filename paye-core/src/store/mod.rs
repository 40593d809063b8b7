pub mod factory;
pub mod handoff;
pub mod memory;
pub mod repository;

pub use factory::{ResultStoreFactory, StoreConfig, StoreRegistry};
pub use handoff::{HandoffState, PAYLOAD_SCHEMA_VERSION, PayloadError, RESULT_SLOT_KEY, ResultHandoff};
pub use memory::{MemoryResultStore, MemoryResultStoreFactory};
pub use repository::{ResultStore, StoreError, StoredPayload};
