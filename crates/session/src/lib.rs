//! Session store and its persistence backends.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, PersistedSession, SessionStorage, StorageError};
pub use store::{SessionStore, DEFAULT_SESSION_TTL_DAYS};
