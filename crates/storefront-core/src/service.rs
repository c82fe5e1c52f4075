//! Remote entity service port.
//!
//! The HTTP collaborator implements this trait and is responsible for
//! turning transport failures into [`ServiceError`] before they reach the
//! store. Bearer credentials are attached by the implementation, not passed
//! through here.

use crate::session::{Credentials, LoginResponse};
use crate::user::UserProfile;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Broad category of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// Request never got a response (connection refused, timeout, ...).
    Transport,
    /// Service answered with a non-success status.
    Status(u16),
    /// Response body did not have the expected shape.
    Decode,
}

/// A failed remote call.
///
/// `message` is the human-readable text from the service's error envelope,
/// when it sent one. `detail` is diagnostic text for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?}: {detail}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: Option<String>,
    pub detail: String,
}

impl ServiceError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Transport,
            message: None,
            detail: detail.into(),
        }
    }

    pub fn status(code: u16, message: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Status(code),
            message: message.filter(|m| !m.trim().is_empty()),
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Decode,
            message: None,
            detail: detail.into(),
        }
    }

    /// The service-provided message, or `fallback` when there is none.
    pub fn message_or(&self, fallback: impl Into<String>) -> String {
        self.message.clone().unwrap_or_else(|| fallback.into())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ServiceErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}

/// Remote service operations consumed by the store.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// `POST /users/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ServiceError>;

    /// `GET /users/profile`
    async fn fetch_profile(&self) -> Result<UserProfile, ServiceError>;

    async fn get(&self, path: &str) -> Result<Value, ServiceError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ServiceError>;

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, ServiceError>;

    async fn delete(&self, path: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_preferred() {
        let err = ServiceError::status(400, Some("Email taken".to_string()), "400 Bad Request");
        assert_eq!(err.message_or("Failed To Create Company"), "Email taken");
    }

    #[test]
    fn test_fallback_when_no_message() {
        let err = ServiceError::transport("connection refused");
        assert_eq!(err.message_or("Login failed"), "Login failed");

        let blank = ServiceError::status(500, Some("  ".to_string()), "500");
        assert_eq!(blank.message_or("Login failed"), "Login failed");
    }

    #[test]
    fn test_unauthorized() {
        assert!(ServiceError::status(401, None, "").is_unauthorized());
        assert!(!ServiceError::status(404, None, "").is_unauthorized());
        assert!(!ServiceError::decode("bad json").is_unauthorized());
    }
}
