//! Route table and the pre-transition session guard.

use serde::Serialize;
use std::sync::Arc;

use crate::store::AppStore;

pub const LOGIN_PATH: &str = "/login";

/// Upper bound on static redirects followed for one transition.
const MAX_REDIRECTS: usize = 8;

/// Outcome of the guard for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Hydrates the user profile before a transition when only the token is known.
///
/// A failed hydration has already cleared the session; the transition is
/// turned into a redirect to the login route instead of surfacing the error.
pub struct NavigationGuard {
    store: Arc<AppStore>,
    login_path: String,
}

impl NavigationGuard {
    pub fn new(store: Arc<AppStore>) -> Self {
        Self::with_login_path(store, LOGIN_PATH)
    }

    pub fn with_login_path(store: Arc<AppStore>, login_path: impl Into<String>) -> Self {
        Self {
            store,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub async fn before_each(&self) -> GuardDecision {
        if !self.store.session().needs_profile() {
            return GuardDecision::Proceed;
        }

        match self.store.fetch_user().await {
            Ok(_) => GuardDecision::Proceed,
            Err(e) => {
                tracing::info!(
                    "[NavigationGuard] Session invalid ({}), redirecting to {}",
                    e,
                    self.login_path
                );
                GuardDecision::Redirect(self.login_path.clone())
            }
        }
    }
}

/// What a path maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteTarget {
    View { name: String },
    Redirect { to: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub target: RouteTarget,
}

impl Route {
    pub fn view(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View { name: name.into() },
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect { to: to.into() },
        }
    }

    /// View name, if this route renders one.
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::View { name } => Some(name.as_str()),
            RouteTarget::Redirect { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResolution {
    /// Enter this view.
    Proceed(Route),
    /// Navigate to this path instead.
    Redirect(String),
    NotFound(String),
}

/// Storefront routes: `/` redirects to `/home`.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::redirect("/", "/home"),
        Route::view("/home", "Home"),
        Route::view("/products", "Products"),
        Route::view(LOGIN_PATH, "Login"),
    ]
}

pub struct Router {
    routes: Vec<Route>,
    guard: NavigationGuard,
}

impl Router {
    pub fn new(guard: NavigationGuard) -> Self {
        Self::with_routes(guard, default_routes())
    }

    pub fn with_routes(guard: NavigationGuard, routes: Vec<Route>) -> Self {
        Self { routes, guard }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Resolves `path` for one transition.
    ///
    /// Static redirects are followed first, unknown paths are rejected, and
    /// only then does the guard run (once).
    pub async fn resolve(&self, path: &str) -> RouteResolution {
        let mut current = normalize(path);

        for _ in 0..=MAX_REDIRECTS {
            let Some(route) = self.lookup(&current) else {
                tracing::debug!("[Router] No route for {}", current);
                return RouteResolution::NotFound(current);
            };

            match &route.target {
                RouteTarget::Redirect { to } => {
                    tracing::debug!("[Router] {} -> {}", current, to);
                    current = normalize(to);
                }
                RouteTarget::View { .. } => {
                    return match self.guard.before_each().await {
                        GuardDecision::Proceed => RouteResolution::Proceed(route.clone()),
                        GuardDecision::Redirect(to) => RouteResolution::Redirect(to),
                    };
                }
            }
        }

        tracing::warn!("[Router] Redirect loop while resolving {}", path);
        RouteResolution::NotFound(normalize(path))
    }

    fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
