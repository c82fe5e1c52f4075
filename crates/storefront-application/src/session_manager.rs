//! Authentication session lifecycle.
//!
//! `SessionManager` owns the token and the loaded user profile. The token is
//! mirrored to persistent storage under `token` so it survives restarts; the
//! profile is never persisted and is re-fetched lazily (see `NavigationGuard`).

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use storefront_core::error::{Result, StorefrontError};
use storefront_core::service::RemoteService;
use storefront_core::session::{Credentials, LoginResponse, Session};
use storefront_core::storage::{KeyValueStore, keys};
use storefront_core::user::UserProfile;

pub const LOGIN_FAILED: &str = "Login failed";
pub const PROFILE_FAILED: &str = "Failed To Fetch User Profile";

pub struct SessionManager {
    service: Arc<dyn RemoteService>,
    storage: Arc<dyn KeyValueStore>,
    session: RwLock<Session>,
}

impl SessionManager {
    /// Creates the manager, rehydrating the token from persistent storage.
    pub fn new(service: Arc<dyn RemoteService>, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = Session::with_token(storage.get(keys::TOKEN));
        tracing::debug!(
            "[SessionManager] Startup token present: {}",
            session.is_authenticated()
        );

        Self {
            service,
            storage,
            session: RwLock::new(session),
        }
    }

    /// Authenticates with the remote service.
    ///
    /// On success the token is persisted and the session holds both token and
    /// user. On failure the session is untouched.
    ///
    /// # Errors
    ///
    /// `StorefrontError::Auth` with the service's message, or `"Login failed"`.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let credentials = Credentials::new(email, password);

        let LoginResponse { token, user } = self.service.login(&credentials).await.map_err(|e| {
            tracing::warn!("[SessionManager] Login rejected: {}", e);
            StorefrontError::auth(e.message_or(LOGIN_FAILED))
        })?;

        if let Err(e) = self.storage.set(keys::TOKEN, &token) {
            tracing::warn!("[SessionManager] Failed to persist token: {}", e);
        }
        self.write().establish(token, user.clone());

        tracing::info!(
            "[SessionManager] Logged in (role: {})",
            user.role().unwrap_or("-")
        );
        Ok(user)
    }

    /// Clears the session and the persisted token. Local only; always succeeds.
    pub fn logout(&self) {
        self.clear();
        tracing::info!("[SessionManager] Logged out");
    }

    /// Loads the profile for the already-stored token.
    ///
    /// # Errors
    ///
    /// Any failure clears the session and the persisted token, then returns
    /// `StorefrontError::Session` so the caller can redirect to login.
    pub async fn fetch_user(&self) -> Result<UserProfile> {
        if !self.is_authenticated() {
            self.clear();
            return Err(StorefrontError::session("Not authenticated"));
        }

        let user = match self.service.fetch_profile().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("[SessionManager] Profile fetch failed, clearing session: {}", e);
                self.clear();
                return Err(StorefrontError::session(e.message_or(PROFILE_FAILED)));
            }
        };

        if !self.write().set_user(user.clone()) {
            // Logged out while the request was in flight.
            return Err(StorefrontError::session("Not authenticated"));
        }

        tracing::debug!("[SessionManager] Profile loaded");
        Ok(user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn user_role(&self) -> Option<String> {
        self.read().user_role().map(str::to_string)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().user().cloned()
    }

    /// Token present but no profile loaded yet.
    pub fn needs_profile(&self) -> bool {
        self.read().needs_profile()
    }

    /// Copy of the current session state.
    pub fn current(&self) -> Session {
        self.read().clone()
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove(keys::TOKEN) {
            tracing::warn!("[SessionManager] Failed to remove persisted token: {}", e);
        }
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
