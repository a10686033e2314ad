use std::collections::HashSet;

use chrono::Utc;
use tracing::warn;

use backend_domain::{DungeonKind, GameServer};

use crate::queries::schedule_queries;
use crate::AppState;

#[derive(Debug, Default, Clone, Copy)]
pub struct PassOutcome {
    pub newly_started: usize,
    pub sent: usize,
    pub failed: usize,
}

/// One notification tick: detect just-started events and fan out start
/// alerts and daily-summary pushes.
///
/// Delivery is at-most-once. A failed send is logged and skipped; it never
/// blocks the remaining destinations and is never retried.
pub async fn run_started_pass(state: &AppState) -> PassOutcome {
    let now = Utc::now();
    let events = state.store.current_events().await;
    let mut outcome = PassOutcome::default();
    let mut rotation_alerts: Vec<(GameServer, String)> = Vec::new();
    let mut daily_refresh: HashSet<GameServer> = HashSet::new();

    for event in events.iter() {
        if !event.is_started(now) {
            continue;
        }
        if !state.store.mark_started(&event.key).await {
            continue;
        }
        outcome.newly_started += 1;

        if event.kind.is_rotation() {
            rotation_alerts.push((
                event.server,
                format!(
                    "Server {}, group {} : {} is starting",
                    event.server,
                    event.group_long_name(),
                    event.name_and_modifier
                ),
            ));
        } else if event.dungeon_kind != DungeonKind::Normal {
            daily_refresh.insert(event.server);
        }
    }

    let book = state.subscriptions.read().await.clone();

    for (server, message) in &rotation_alerts {
        for entry in book.rotation_for(*server) {
            deliver(state, &entry.destination_id, message, &mut outcome).await;
        }
    }

    for server in daily_refresh {
        let text = schedule_queries::active_schedule(state, server).await;
        let pages = paginate(&text, state.config.max_message_len);
        for entry in book.daily_for(server) {
            for page in &pages {
                deliver(state, &entry.destination_id, page, &mut outcome).await;
            }
        }
    }

    outcome
}

async fn deliver(state: &AppState, destination_id: &str, text: &str, outcome: &mut PassOutcome) {
    match state.sender.send(destination_id, text).await {
        Ok(()) => {
            state.metrics.record_notification();
            outcome.sent += 1;
        }
        Err(err) => {
            state.metrics.record_send_failure();
            outcome.failed += 1;
            warn!("send to destination {} failed: {}", destination_id, err);
        }
    }
}

/// Splits a long message on newline boundaries, keeping each page under
/// `max_len` bytes. A single oversized line still becomes its own page.
pub fn paginate(text: &str, max_len: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > max_len {
            pages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{event_at, started_event, state_with, RecordingSender, StubCatalog};
    use backend_domain::{EventKind, SubscriptionBook, SubscriptionEntry};
    use chrono::Duration;
    use std::sync::Arc;

    fn book_with_rotation(ids: &[&str]) -> SubscriptionBook {
        let mut book = SubscriptionBook::default();
        for id in ids {
            book.add_rotation(SubscriptionEntry {
                destination_id: id.to_string(),
                server: GameServer::Na,
            });
        }
        book
    }

    fn sender_state(sender: RecordingSender, book: SubscriptionBook) -> (AppState, Arc<RecordingSender>) {
        let sender = Arc::new(sender);
        let state = state_with(
            Arc::new(StubCatalog::with_records(Vec::new())),
            sender.clone(),
            book,
        );
        (state, sender)
    }

    #[tokio::test]
    async fn started_event_notifies_each_subscriber_exactly_once() {
        let (state, sender) =
            sender_state(RecordingSender::default(), book_with_rotation(&["chan-1"]));
        let event = started_event("g1", GameServer::Na, EventKind::Guerrilla, "B", "Metal Rush");
        state.store.replace_snapshot(vec![event]).await;

        let first = run_started_pass(&state).await;
        assert_eq!(first.newly_started, 1);
        assert_eq!(first.sent, 1);

        let second = run_started_pass(&state).await;
        assert_eq!(second.newly_started, 0);
        assert_eq!(second.sent, 0);

        let attempts = sender.attempts.lock().await;
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].0, "chan-1");
        assert!(attempts[0].1.contains("group B"));
        assert!(attempts[0].1.contains("Metal Rush"));
    }

    #[tokio::test]
    async fn one_failing_destination_does_not_block_the_next() {
        let (state, sender) = sender_state(
            RecordingSender::failing_for(&["chan-bad"]),
            book_with_rotation(&["chan-bad", "chan-good"]),
        );
        let event = started_event("g1", GameServer::Na, EventKind::Guerrilla, "A", "X");
        state.store.replace_snapshot(vec![event]).await;

        let outcome = run_started_pass(&state).await;
        assert_eq!(outcome.sent, 1);
        assert_eq!(outcome.failed, 1);

        let attempts = sender.attempts.lock().await;
        let ids: Vec<&str> = attempts.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["chan-bad", "chan-good"]);
    }

    #[tokio::test]
    async fn pending_events_do_not_notify() {
        let (state, sender) =
            sender_state(RecordingSender::default(), book_with_rotation(&["chan-1"]));
        let now = Utc::now();
        let event = event_at(
            "future",
            GameServer::Na,
            EventKind::Guerrilla,
            "A",
            now + Duration::minutes(5),
            now + Duration::hours(1),
            "X",
        );
        state.store.replace_snapshot(vec![event]).await;

        let outcome = run_started_pass(&state).await;
        assert_eq!(outcome.newly_started, 0);
        assert!(sender.attempts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn rotation_alerts_only_reach_subscribers_of_the_same_server() {
        let mut book = book_with_rotation(&["na-chan"]);
        book.add_rotation(SubscriptionEntry {
            destination_id: "jp-chan".to_string(),
            server: GameServer::Jp,
        });
        let (state, sender) = sender_state(RecordingSender::default(), book);
        let event = started_event("g1", GameServer::Jp, EventKind::SpecialWeek, "RED", "X");
        state.store.replace_snapshot(vec![event]).await;

        run_started_pass(&state).await;
        let attempts = sender.attempts.lock().await;
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].0, "jp-chan");
    }

    #[tokio::test]
    async fn non_normal_events_push_a_daily_summary() {
        let mut book = SubscriptionBook::default();
        book.add_daily(SubscriptionEntry {
            destination_id: "daily-chan".to_string(),
            server: GameServer::Na,
        });
        let (state, sender) = sender_state(RecordingSender::default(), book);

        let mut event = started_event("sp1", GameServer::Na, EventKind::Special, "", "Gift Box");
        event.dungeon_kind = DungeonKind::Technical;
        state.store.replace_snapshot(vec![event]).await;

        let outcome = run_started_pass(&state).await;
        assert_eq!(outcome.sent, 1);
        let attempts = sender.attempts.lock().await;
        assert_eq!(attempts[0].0, "daily-chan");
        assert!(attempts[0].1.contains("Listing all events for NA"));
    }

    #[tokio::test]
    async fn normal_dungeon_events_trigger_nothing() {
        let mut book = SubscriptionBook::default();
        book.add_daily(SubscriptionEntry {
            destination_id: "daily-chan".to_string(),
            server: GameServer::Na,
        });
        let (state, sender) = sender_state(RecordingSender::default(), book);

        let mut event = started_event("w1", GameServer::Na, EventKind::Week, "", "Weekly");
        event.dungeon_kind = DungeonKind::Normal;
        state.store.replace_snapshot(vec![event]).await;

        let outcome = run_started_pass(&state).await;
        assert_eq!(outcome.newly_started, 1);
        assert_eq!(outcome.sent, 0);
        assert!(sender.attempts.lock().await.is_empty());
    }

    #[test]
    fn paginate_splits_on_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        let pages = paginate(text, 9);
        assert_eq!(pages, vec!["aaaa\nbbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn paginate_keeps_short_text_whole() {
        let pages = paginate("one\ntwo", 100);
        assert_eq!(pages, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn paginate_emits_oversized_lines_as_their_own_page() {
        let pages = paginate("tiny\nthis-line-is-much-too-long", 10);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], "this-line-is-much-too-long");
    }
}
