use std::collections::HashMap;

use chrono::{DateTime, Utc};

use backend_domain::services::EventQuery;
use backend_domain::{EventKind, GameEvent, GameServer};

use crate::AppState;

/// Renders the compact per-group digest of active and upcoming rotations.
pub async fn rotation_digest(state: &AppState, server: GameServer) -> String {
    let events = state.store.current_events().await;
    render_rotation_digest(&events, server, Utc::now())
}

pub fn render_rotation_digest(
    events: &[GameEvent],
    server: GameServer,
    now: DateTime<Utc>,
) -> String {
    let query = EventQuery::new(events)
        .with_server(server)
        .in_kinds(&[EventKind::Guerrilla, EventKind::SpecialWeek]);

    let active = earliest_per_group(query.active_only(now).by_open_time(false));
    let pending = earliest_per_group(query.pending_only(now).by_open_time(false));

    if active.is_empty() && pending.is_empty() {
        return format!("No events available for {}", server);
    }

    let mut out = format!("Events for {}", server);
    if !active.is_empty() {
        out.push_str("\n\nG Remaining Dungeon");
        for event in &active {
            out.push('\n');
            out.push_str(&event.partial_line(now));
        }
    }
    if !pending.is_empty() {
        out.push_str("\n\nG PT    ET    ETA     Dungeon");
        for event in &pending {
            out.push('\n');
            out.push_str(&event.partial_line(now));
        }
    }
    out
}

/// Keeps the earliest event per rotation group, listed in descending group
/// order.
fn earliest_per_group(sorted_by_open: Vec<&GameEvent>) -> Vec<&GameEvent> {
    let mut by_group: HashMap<&str, &GameEvent> = HashMap::new();
    for event in sorted_by_open {
        by_group.entry(event.group.as_str()).or_insert(event);
    }
    let mut list: Vec<&GameEvent> = by_group.into_values().collect();
    list.sort_by(|a, b| b.group.cmp(&a.group));
    list
}
