//! RestApiClient - reqwest implementation of the remote service port.
//!
//! Every request carries `Authorization: Bearer <token>` when a token is in
//! persistent storage, read fresh per request so login/logout take effect
//! immediately. Failures are normalized into `ServiceError`; the service's
//! error envelope `{ "message": "..." }` becomes `ServiceError::message`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::config::ApiConfig;
use storefront_core::service::{RemoteService, ServiceError};
use storefront_core::session::{Credentials, LoginResponse};
use storefront_core::storage::{KeyValueStore, keys};
use storefront_core::user::UserProfile;

const LOGIN_PATH: &str = "/users/login";
const PROFILE_PATH: &str = "/users/profile";

#[derive(Clone)]
pub struct RestApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn KeyValueStore>,
}

impl RestApiClient {
    /// Creates a client for `base_url` (e.g. `https://shop.example.com/api`).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(config: &ApiConfig, credentials: Arc<dyn KeyValueStore>) -> Result<Self, ServiceError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            credentials,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match self.credentials.get(keys::TOKEN).filter(|t| !t.is_empty()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(
            "[RestApiClient] {} {}",
            status,
            message.as_deref().unwrap_or("(no message)")
        );
        Err(ServiceError::status(
            status.as_u16(),
            message,
            format!("API error ({}): {}", status, body),
        ))
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ServiceError> {
        let response = self.send(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::transport(format!("Failed to read response: {}", e)))?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| ServiceError::decode(format!("Failed to parse response: {}", e)))
    }

    async fn send_typed<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let value = self.send_json(request).await?;
        serde_json::from_value(value)
            .map_err(|e| ServiceError::decode(format!("Unexpected response shape: {}", e)))
    }
}

/// Pulls `message` out of an error envelope, if the body is one.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl RemoteService for RestApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ServiceError> {
        let request = self.request(Method::POST, LOGIN_PATH).json(credentials);
        self.send_typed(request).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ServiceError> {
        self.send_typed(self.request(Method::GET, PROFILE_PATH)).await
    }

    async fn get(&self, path: &str) -> Result<Value, ServiceError> {
        self.send_json(self.request(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        let request = self.request(Method::POST, path).json(body);
        self.send_json(request).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        let request = self.request(Method::PATCH, path).json(body);
        self.send_json(request).await
    }

    async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
