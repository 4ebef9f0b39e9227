//! Client-side session handling.

mod manager;
mod storage;

pub use manager::{SessionManager, SessionState};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockSessionStorage;
