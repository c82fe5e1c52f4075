//! Remote service integrations.
//!
//! [`RestApiClient`] talks to the storefront HTTP API and implements the
//! `RemoteService` port the application layer depends on.

pub mod rest_api_client;

pub use rest_api_client::RestApiClient;
