//! AppStore - the explicitly constructed client state container.
//!
//! Built once by the composition root and shared as `Arc<AppStore>`. Each
//! sub-state owns its own lock; no lock is held across a remote call.

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use storefront_core::entity::{Category, Company, EntityId, Item, Order};
use storefront_core::error::Result;
use storefront_core::reward::RewardProgress;
use storefront_core::service::RemoteService;
use storefront_core::storage::KeyValueStore;
use storefront_core::user::UserProfile;

use crate::entity_cache::EntityCache;
use crate::reward_tracker::RewardTracker;
use crate::session_manager::SessionManager;

pub struct AppStore {
    session: SessionManager,
    rewards: RewardTracker,
    companies: EntityCache<Company>,
    categories: EntityCache<Category>,
    items: EntityCache<Item>,
    orders: EntityCache<Order>,
    selected_company: RwLock<Option<Company>>,
}

impl AppStore {
    /// Wires every sub-state to the given ports and runs startup hydration.
    pub fn new(service: Arc<dyn RemoteService>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionManager::new(service.clone(), storage.clone()),
            rewards: RewardTracker::new(storage),
            companies: EntityCache::new(service.clone()),
            categories: EntityCache::new(service.clone()),
            items: EntityCache::new(service.clone()),
            orders: EntityCache::new(service),
            selected_company: RwLock::new(None),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn rewards(&self) -> &RewardTracker {
        &self.rewards
    }

    pub fn companies(&self) -> &EntityCache<Company> {
        &self.companies
    }

    pub fn categories(&self) -> &EntityCache<Category> {
        &self.categories
    }

    pub fn items(&self) -> &EntityCache<Item> {
        &self.items
    }

    pub fn orders(&self) -> &EntityCache<Order> {
        &self.orders
    }

    // ============================================================================
    // Getters
    // ============================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user_role(&self) -> Option<String> {
        self.session.user_role()
    }

    pub fn snake_apples(&self) -> u32 {
        self.rewards.apples()
    }

    pub fn snake_discount_unlocked(&self) -> bool {
        self.rewards.discount_unlocked()
    }

    pub fn selected_company(&self) -> Option<Company> {
        self.selected_company
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ============================================================================
    // Actions
    // ============================================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        self.session.login(email, password).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub async fn fetch_user(&self) -> Result<UserProfile> {
        self.session.fetch_user().await
    }

    pub fn increment_apples(&self) -> RewardProgress {
        self.rewards.increment()
    }

    pub fn reset_apples(&self) {
        self.rewards.reset();
    }

    /// Loads one company into the selected-company slot.
    ///
    /// On failure the slot keeps whatever it held before. The slot is a copy:
    /// later updates or deletes through `companies()` do not touch it.
    pub async fn get_company(&self, id: &EntityId) -> Result<Company> {
        let company = self.companies.fetch_one(id).await?;
        *self
            .selected_company
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(company.clone());
        tracing::debug!("[AppStore] Selected company {}", id);
        Ok(company)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let session = self.session.current();
        StoreSnapshot {
            is_authenticated: session.is_authenticated(),
            user_role: session.user_role().map(str::to_string),
            user: session.user().cloned(),
            snake_apples: self.snake_apples(),
            snake_discount_unlocked: self.snake_discount_unlocked(),
            companies: self.companies.records(),
            categories: self.categories.records(),
            items: self.items.records(),
            orders: self.orders.records(),
            selected_company: self.selected_company(),
        }
    }
}

/// Serializable view of the whole store. Never carries the token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub is_authenticated: bool,
    pub user_role: Option<String>,
    pub user: Option<UserProfile>,
    pub snake_apples: u32,
    pub snake_discount_unlocked: bool,
    pub companies: Vec<Company>,
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub orders: Vec<Order>,
    pub selected_company: Option<Company>,
}
