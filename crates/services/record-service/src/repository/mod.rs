//! Repository layer for data access.

mod memory_store;
mod record_store;
pub mod seed;

pub use memory_store::InMemoryStore;
pub use record_store::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
pub use record_store::MockRecordStore;
