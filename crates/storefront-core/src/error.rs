//! Error types for the storefront client.

use crate::entity::{EntityKind, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every store operation.
///
/// Remote-call failures are normalized to a message string before they land
/// here: the service-provided message when there is one, a static fallback
/// otherwise. Nothing in this taxonomy is fatal; callers retry or redirect.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorefrontError {
    /// Login was rejected.
    #[error("{0}")]
    Auth(String),

    /// Profile fetch/refresh failed. The session has already been cleared.
    #[error("{0}")]
    Session(String),

    /// Listing a collection failed.
    #[error("{message}")]
    Fetch { kind: EntityKind, message: String },

    /// Fetching a single record failed.
    #[error("{message}")]
    FetchOne { kind: EntityKind, message: String },

    /// Creating a record failed.
    #[error("{message}")]
    Create { kind: EntityKind, message: String },

    /// Updating a record failed.
    #[error("{message}")]
    Update { kind: EntityKind, message: String },

    /// Deleting a record failed.
    #[error("{message}")]
    Delete { kind: EntityKind, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistent storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl StorefrontError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Creates the error variant matching a failed CRUD `operation`.
    pub fn crud(kind: EntityKind, operation: Operation, message: impl Into<String>) -> Self {
        let message = message.into();
        match operation {
            Operation::FetchAll => Self::Fetch { kind, message },
            Operation::FetchOne => Self::FetchOne { kind, message },
            Operation::Create => Self::Create { kind, message },
            Operation::Update => Self::Update { kind, message },
            Operation::Delete => Self::Delete { kind, message },
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// The normalized, user-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Auth(message) | Self::Session(message) => message.clone(),
            Self::Fetch { message, .. }
            | Self::FetchOne { message, .. }
            | Self::Create { message, .. }
            | Self::Update { message, .. }
            | Self::Delete { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The entity kind a CRUD failure is scoped to.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Fetch { kind, .. }
            | Self::FetchOne { kind, .. }
            | Self::Create { kind, .. }
            | Self::Update { kind, .. }
            | Self::Delete { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// A session error always means the caller should send the user to login.
    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StorefrontError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::storage::StorageError> for StorefrontError {
    fn from(err: crate::storage::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A type alias for `Result<T, StorefrontError>`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
