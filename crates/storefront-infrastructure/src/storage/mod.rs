//! Persistent key-value store adapters.

mod file_kv_store;
mod memory_kv_store;

pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::InMemoryKeyValueStore;
