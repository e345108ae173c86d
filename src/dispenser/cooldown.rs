//! Per-user dispense cooldowns
//!
//! Presence in the registry is the cooldown: an entry is inserted when a
//! dispense goes through and a spawned one-shot timer removes it once
//! the window elapses. Nothing is persisted; a restart clears the set.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// In-memory set of users currently barred from dispensing
#[derive(Clone, Default)]
pub struct CooldownRegistry {
    /// user id -> timer generation; only the timer holding the current
    /// generation may clear the entry, so restarting a cooldown makes
    /// the superseded timer a no-op
    entries: Arc<DashMap<u64, u64>>,
}

impl CooldownRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Whether a user is currently cooling down.
    #[must_use]
    pub fn is_on_cooldown(&self, user_id: u64) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Put a user on cooldown for `duration`.
    ///
    /// Calling this for a user who is already cooling down restarts the
    /// window from now.
    pub fn start(&self, user_id: u64, duration: Duration) {
        let generation = {
            let mut entry = self.entries.entry(user_id).or_insert(0);
            *entry += 1;
            *entry
        };

        let expires_at = Utc::now()
            + chrono::Duration::seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX));
        debug!(user_id, %expires_at, "Cooldown started");

        let entries = Arc::clone(&self.entries);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let removed = entries.remove_if(&user_id, |_, current| *current == generation);
            if removed.is_some() {
                debug!(user_id, "Cooldown expired");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_holds_for_the_window_then_expires() {
        let registry = CooldownRegistry::new();
        registry.start(7, WINDOW);
        assert!(registry.is_on_cooldown(7));

        // Just shy of the window the user is still barred.
        tokio::time::sleep(WINDOW - Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(registry.is_on_cooldown(7));

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(!registry.is_on_cooldown(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_the_window() {
        let registry = CooldownRegistry::new();
        registry.start(7, WINDOW);

        tokio::time::sleep(WINDOW / 2).await;
        registry.start(7, WINDOW);

        // The superseded timer fires here and must not clear the entry.
        tokio::time::sleep(WINDOW / 2 + Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(registry.is_on_cooldown(7));

        tokio::time::sleep(WINDOW).await;
        tokio::task::yield_now().await;
        assert!(!registry.is_on_cooldown(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_users_cool_down_independently() {
        let registry = CooldownRegistry::new();
        registry.start(1, WINDOW);
        registry.start(2, WINDOW * 2);

        assert!(registry.is_on_cooldown(1));
        assert!(registry.is_on_cooldown(2));
        assert!(!registry.is_on_cooldown(3));

        tokio::time::sleep(WINDOW + Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(!registry.is_on_cooldown(1));
        assert!(registry.is_on_cooldown(2));
    }
}
