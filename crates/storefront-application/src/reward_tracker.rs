//! Snake reward counter, persisted through the key-value store.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use storefront_core::reward::{REWARD_TARGET, RewardProgress};
use storefront_core::storage::{KeyValueStore, keys};

/// Persisted apple counter for the snake mini-game discount.
///
/// Runs entirely locally. Every mutation writes both keys through to
/// storage; write failures are logged and otherwise ignored.
pub struct RewardTracker {
    storage: Arc<dyn KeyValueStore>,
    progress: RwLock<RewardProgress>,
}

impl RewardTracker {
    /// Hydrates from `snake_apples` / `snake_discount_unlocked`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let progress = RewardProgress::hydrate(
            storage.get(keys::SNAKE_APPLES).as_deref(),
            storage.get(keys::SNAKE_DISCOUNT_UNLOCKED).as_deref(),
        );
        tracing::debug!(
            "[RewardTracker] Hydrated: {} apple(s), unlocked={}",
            progress.count,
            progress.unlocked
        );

        Self {
            storage,
            progress: RwLock::new(progress),
        }
    }

    /// Eats one apple and returns the new progress.
    pub fn increment(&self) -> RewardProgress {
        let mut progress = self.write();
        if progress.increment() {
            tracing::info!(
                "[RewardTracker] Discount unlocked after {} apples",
                REWARD_TARGET
            );
        }
        self.persist(&progress);
        *progress
    }

    pub fn reset(&self) {
        let mut progress = self.write();
        progress.reset();
        self.persist(&progress);
        tracing::debug!("[RewardTracker] Progress reset");
    }

    pub fn progress(&self) -> RewardProgress {
        *self.progress.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apples(&self) -> u32 {
        self.progress().count
    }

    pub fn discount_unlocked(&self) -> bool {
        self.progress().unlocked
    }

    fn persist(&self, progress: &RewardProgress) {
        let writes = [
            (keys::SNAKE_APPLES, progress.count_value()),
            (keys::SNAKE_DISCOUNT_UNLOCKED, progress.flag_value().to_string()),
        ];
        for (key, value) in writes {
            if let Err(e) = self.storage.set(key, &value) {
                tracing::warn!("[RewardTracker] Failed to persist {}: {}", key, e);
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, RewardProgress> {
        self.progress.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ReadOnlyKeyValueStore;
    use storefront_infrastructure::InMemoryKeyValueStore;

    #[test]
    fn test_fresh_storage_starts_at_zero() {
        let tracker = RewardTracker::new(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(tracker.progress(), RewardProgress::default());
    }

    #[test]
    fn test_increment_persists_both_keys() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let tracker = RewardTracker::new(storage.clone());

        let progress = tracker.increment();

        assert_eq!(progress.count, 1);
        assert_eq!(storage.get(keys::SNAKE_APPLES), Some("1".to_string()));
        assert_eq!(storage.get(keys::SNAKE_DISCOUNT_UNLOCKED), Some("false".to_string()));
    }

    #[test]
    fn test_target_unlocks_and_survives_restart() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let tracker = RewardTracker::new(storage.clone());

        for _ in 0..REWARD_TARGET - 1 {
            tracker.increment();
        }
        assert!(!tracker.discount_unlocked());

        tracker.increment();
        assert_eq!(tracker.apples(), REWARD_TARGET);
        assert!(tracker.discount_unlocked());

        let restarted = RewardTracker::new(storage.clone());
        assert_eq!(restarted.apples(), REWARD_TARGET);
        assert!(restarted.discount_unlocked());
        assert_eq!(storage.get(keys::SNAKE_DISCOUNT_UNLOCKED), Some("true".to_string()));
    }

    #[test]
    fn test_reset_after_unlock() {
        let storage = Arc::new(InMemoryKeyValueStore::with_entries([
            (keys::SNAKE_APPLES, "50"),
            (keys::SNAKE_DISCOUNT_UNLOCKED, "true"),
        ]));
        let tracker = RewardTracker::new(storage.clone());

        tracker.reset();
        assert_eq!(storage.get(keys::SNAKE_APPLES), Some("0".to_string()));
        assert_eq!(storage.get(keys::SNAKE_DISCOUNT_UNLOCKED), Some("false".to_string()));

        let progress = tracker.increment();
        assert_eq!(progress.count, 1);
        assert!(!progress.unlocked);
    }

    #[test]
    fn test_malformed_stored_counter() {
        for raw in ["-5", "abc"] {
            let storage = Arc::new(InMemoryKeyValueStore::with_entries([(keys::SNAKE_APPLES, raw)]));
            let tracker = RewardTracker::new(storage);
            assert_eq!(tracker.apples(), 0, "stored {:?}", raw);
        }
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let storage = ReadOnlyKeyValueStore::with_entries(&[(keys::SNAKE_APPLES, "3")]);
        let tracker = RewardTracker::new(Arc::new(storage));

        assert_eq!(tracker.increment().count, 4);
        assert_eq!(tracker.apples(), 4);
    }
}
