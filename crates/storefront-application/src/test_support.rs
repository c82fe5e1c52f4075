//! Test doubles for the store's ports.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use storefront_core::service::{RemoteService, ServiceError};
use storefront_core::session::{Credentials, LoginResponse};
use storefront_core::storage::{KeyValueStore, StorageError};
use storefront_core::user::UserProfile;

/// A recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Scripted = Result<Value, ServiceError>;

/// Remote service that answers from a per-route script, in order.
///
/// A call with nothing scripted fails with a transport error.
#[derive(Default)]
pub struct MockRemoteService {
    script: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockRemoteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: &'static str, path: &str, response: Scripted) -> &Self {
        self.script
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    pub fn ok(&self, method: &'static str, path: &str, body: Value) -> &Self {
        self.on(method, path, Ok(body))
    }

    pub fn fail(&self, method: &'static str, path: &str, status: u16, message: Option<&str>) -> &Self {
        self.on(
            method,
            path,
            Err(ServiceError::status(
                status,
                message.map(str::to_string),
                format!("HTTP {}", status),
            )),
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> Scripted {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        self.script
            .lock()
            .unwrap()
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ServiceError::transport(format!("no script for {} {}", method, path))))
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| ServiceError::decode(e.to_string()))
}

#[async_trait]
impl RemoteService for MockRemoteService {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ServiceError> {
        let body = serde_json::to_value(credentials).ok();
        decode(self.answer("POST", "/users/login", body)?)
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ServiceError> {
        decode(self.answer("GET", "/users/profile", None)?)
    }

    async fn get(&self, path: &str) -> Result<Value, ServiceError> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        self.answer("POST", path, Some(body.clone()))
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        self.answer("PATCH", path, Some(body.clone()))
    }

    async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        self.answer("DELETE", path, None).map(|_| ())
    }
}

/// Storage whose reads work from a fixed map and whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyKeyValueStore {
    entries: HashMap<String, String>,
}

impl ReadOnlyKeyValueStore {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for ReadOnlyKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}
