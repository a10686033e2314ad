use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use backend_domain::GameEvent;

/// Authoritative in-memory snapshot of known events, plus the set of event
/// keys that already produced a start notification.
///
/// The snapshot is replaced wholesale on refresh; the started set is only
/// ever added to and survives every swap for the process lifetime. Stale
/// keys from events that left the catalog are retained on purpose — see
/// DESIGN.md for the growth tradeoff.
#[derive(Debug, Default)]
pub struct EventStore {
    snapshot: RwLock<Arc<Vec<GameEvent>>>,
    started: Mutex<HashSet<String>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the event snapshot. The write lock is held only for the
    /// pointer swap, so readers observe either the old set or the new one,
    /// never a mix. The started set is untouched.
    pub async fn replace_snapshot(&self, events: Vec<GameEvent>) {
        let mut guard = self.snapshot.write().await;
        *guard = Arc::new(events);
    }

    pub async fn current_events(&self) -> Arc<Vec<GameEvent>> {
        self.snapshot.read().await.clone()
    }

    /// Records a key as started. Returns true only for the first call with
    /// that key over the lifetime of the store — the caller's signal to
    /// notify; false means suppress.
    pub async fn mark_started(&self, key: &str) -> bool {
        self.started.lock().await.insert(key.to_string())
    }

    /// Absorbs keys that were already started when a snapshot was fetched,
    /// without reporting any of them as new.
    pub async fn seed_started<I>(&self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.started.lock().await.extend(keys);
    }

    pub async fn started_count(&self) -> usize {
        self.started.lock().await.len()
    }

    /// Appends a synthetic event to the live snapshot (drill injection).
    pub async fn append_event(&self, event: GameEvent) {
        let mut guard = self.snapshot.write().await;
        let mut events = guard.as_ref().clone();
        events.push(event);
        *guard = Arc::new(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::started_event;
    use backend_domain::{EventKind, GameServer};

    #[tokio::test]
    async fn mark_started_is_first_call_wins() {
        let store = EventStore::new();
        assert!(store.mark_started("k1").await);
        assert!(!store.mark_started("k1").await);
        assert!(store.mark_started("k2").await);
        assert_eq!(store.started_count().await, 2);
    }

    #[tokio::test]
    async fn concurrent_marks_yield_exactly_one_winner() {
        let store = Arc::new(EventStore::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(
                async move { store.mark_started("same-key").await },
            ));
        }
        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn replace_snapshot_preserves_the_started_set() {
        let store = EventStore::new();
        assert!(store.mark_started("k1").await);

        let event = started_event("other", GameServer::Na, EventKind::Guerrilla, "A", "X");
        store.replace_snapshot(vec![event]).await;
        assert!(!store.mark_started("k1").await);

        store.replace_snapshot(Vec::new()).await;
        assert!(!store.mark_started("k1").await);
    }

    #[tokio::test]
    async fn snapshot_swap_is_all_or_nothing_for_readers() {
        let store = EventStore::new();
        let first = started_event("a", GameServer::Na, EventKind::Guerrilla, "A", "X");
        store.replace_snapshot(vec![first]).await;
        let held = store.current_events().await;

        let second = started_event("b", GameServer::Jp, EventKind::Special, "", "Y");
        store.replace_snapshot(vec![second]).await;

        // The old handle still sees the old snapshot in full.
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].key, "a");
        let fresh = store.current_events().await;
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].key, "b");
    }

    #[tokio::test]
    async fn append_event_extends_the_live_snapshot() {
        let store = EventStore::new();
        let event = started_event("drill", GameServer::Fake, EventKind::Guerrilla, "F", "Drill");
        store.append_event(event).await;
        assert_eq!(store.current_events().await.len(), 1);
    }
}
