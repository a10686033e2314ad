use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Duration, Utc};

use backend_domain::{DungeonKind, EventKind, GameEvent, GameServer};

use crate::{AppError, AppState};

static DRILL_SEQ: AtomicI64 = AtomicI64::new(0);

/// Injects a short-lived fake Guerrilla event so operators can drill the
/// notification path end to end. The event lives in the current snapshot
/// only; the next refresh discards it.
pub async fn inject_test_event(state: &AppState, server: &str) -> Result<String, AppError> {
    let server =
        GameServer::parse(server).map_err(|err| AppError::BadRequest(err.to_string()))?;
    let seq = DRILL_SEQ.fetch_add(1, Ordering::Relaxed);
    let now = Utc::now();
    let event = GameEvent {
        key: format!("drill-{}-{}", now.timestamp_millis(), seq),
        server,
        open_time: now,
        close_time: now + Duration::minutes(1),
        group: "F".to_string(),
        kind: EventKind::Guerrilla,
        dungeon_kind: DungeonKind::Unknown,
        name_and_modifier: "fake_dungeon_name, fake_event_modifier".to_string(),
    };
    let key = event.key.clone();
    state.store.append_event(event).await;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::notify_commands;
    use crate::testing::{state_with, RecordingSender, StubCatalog};
    use backend_domain::{SubscriptionBook, SubscriptionEntry};
    use std::sync::Arc;

    #[tokio::test]
    async fn injected_event_fires_one_rotation_alert() {
        let mut book = SubscriptionBook::default();
        book.add_rotation(SubscriptionEntry {
            destination_id: "chan-1".to_string(),
            server: GameServer::Fake,
        });
        let sender = Arc::new(RecordingSender::default());
        let state = state_with(
            Arc::new(StubCatalog::with_records(Vec::new())),
            sender.clone(),
            book,
        );

        inject_test_event(&state, "FAKE").await.unwrap();
        let outcome = notify_commands::run_started_pass(&state).await;
        assert_eq!(outcome.sent, 1);
        let attempts = sender.attempts.lock().await;
        assert!(attempts[0].1.contains("group F"));
    }

    #[tokio::test]
    async fn injected_keys_are_unique() {
        let state = state_with(
            Arc::new(StubCatalog::with_records(Vec::new())),
            Arc::new(RecordingSender::default()),
            SubscriptionBook::default(),
        );
        let a = inject_test_event(&state, "FAKE").await.unwrap();
        let b = inject_test_event(&state, "FAKE").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(state.store.current_events().await.len(), 2);
    }

    #[tokio::test]
    async fn unsupported_server_is_rejected() {
        let state = state_with(
            Arc::new(StubCatalog::with_records(Vec::new())),
            Arc::new(RecordingSender::default()),
            SubscriptionBook::default(),
        );
        assert!(inject_test_event(&state, "XX").await.is_err());
    }
}
