//! Persistent key-value storage port.
//!
//! Stands in for the browser's local storage: string keys, string values,
//! synchronous access, survives restarts. Only the session token and the
//! reward counters are stored here.

use thiserror::Error;

/// Keys owned by the store.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const SNAKE_APPLES: &str = "snake_apples";
    pub const SNAKE_DISCOUNT_UNLOCKED: &str = "snake_discount_unlocked";
}

/// Errors that can occur while writing to persistent storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value store that outlives the process.
///
/// Reads never fail: an unreadable or absent value is `None`. Writes may
/// fail; the store treats them as best-effort.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
