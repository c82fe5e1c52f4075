//! Session domain models.

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};

/// Authentication state of the client.
///
/// A `None` token always comes with a `None` user: every transition that
/// clears the token clears the user in the same step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// Empty session, optionally carrying a token rehydrated from storage.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            user: None,
        }
    }

    /// Sets token and user together after a successful login.
    pub fn establish(&mut self, token: String, user: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Stores a freshly fetched profile. Ignored when there is no token.
    pub fn set_user(&mut self, user: UserProfile) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.user = Some(user);
        true
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_role(&self) -> Option<&str> {
        self.user.as_ref().and_then(UserProfile::role)
    }

    /// Authenticated but the profile has not been loaded yet (e.g. after a restart).
    pub fn needs_profile(&self) -> bool {
        self.token.is_some() && self.user.is_none()
    }
}

/// Body of `POST /users/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /users/login`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}
