//! Infrastructure adapters for local concerns: persistent key-value
//! storage, path resolution and configuration loading.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
