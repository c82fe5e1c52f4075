//! Application layer for the storefront client.
//!
//! Composes the domain models and ports from `storefront-core` into the
//! client state container (`AppStore`) and the route guard that keeps the
//! session profile hydrated.

pub mod entity_cache;
pub mod navigation;
pub mod reward_tracker;
pub mod session_manager;
pub mod store;

#[cfg(test)]
mod test_support;

pub use entity_cache::EntityCache;
pub use navigation::{GuardDecision, NavigationGuard, Route, RouteResolution, RouteTarget, Router};
pub use reward_tracker::RewardTracker;
pub use session_manager::SessionManager;
pub use store::{AppStore, StoreSnapshot};
