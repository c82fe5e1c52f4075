//! Domain layer for the storefront client.
//!
//! Holds the models, the pure mutation rules, the shared error type and the
//! two ports the application layer depends on: [`storage::KeyValueStore`]
//! and [`service::RemoteService`]. Nothing here performs I/O.

pub mod config;
pub mod entity;
pub mod error;
pub mod reward;
pub mod service;
pub mod session;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{Result, StorefrontError};
