use chrono::{DateTime, Utc};

use backend_domain::services::{rotation_rows, EventQuery, GUERRILLA_GROUPS, STARTER_GROUPS};
use backend_domain::{DungeonKind, EventKind, GameEvent, GameServer};

use crate::AppState;

/// Renders the full schedule text for one server.
pub async fn active_schedule(state: &AppState, server: GameServer) -> String {
    let events = state.store.current_events().await;
    render_active_schedule(&events, server, &state.excluded_names, Utc::now())
}

/// Pure rendering body, separated so tests can pin the clock.
pub fn render_active_schedule(
    events: &[GameEvent],
    server: GameServer,
    excluded_names: &[String],
    now: DateTime<Utc>,
) -> String {
    let server_events = EventQuery::new(events).with_server(server);
    let active = server_events.active_only(now);
    let pending = server_events.pending_only(now);

    let mut msg = format!("Listing all events for {}", server);

    let special = active.with_kind(EventKind::Special).by_close_time(false);
    if !special.is_empty() {
        msg.push_str("\n\n");
        msg.push_str(&timed_table("Special Events", &special, now));
    }

    let etc = active
        .with_kind(EventKind::Etc)
        .with_dungeon_kind(DungeonKind::Etc, false)
        .excluding_names(excluded_names)
        .by_close_time(false);
    if !etc.is_empty() {
        msg.push_str("\n\n");
        msg.push_str(&timed_table("Etc Events", &etc, now));
    }

    // Old-style guerrillas, then new-style rotations, each as an active
    // table plus the pending grid.
    for (kind, labels) in [
        (EventKind::Guerrilla, &GUERRILLA_GROUPS[..]),
        (EventKind::SpecialWeek, &STARTER_GROUPS[..]),
    ] {
        let active_rotations = active.with_kind(kind);
        if !active_rotations.is_empty() {
            msg.push_str("\n\n");
            msg.push_str(&active_rotation_table(
                "Active Guerrillas",
                active_rotations.items(),
                now,
            ));
        }
        let pending_rotations = pending.with_kind(kind);
        if !pending_rotations.is_empty() {
            msg.push_str("\n\n");
            msg.push_str(&pending_rotation_table(pending_rotations.items(), labels));
        }
    }

    msg
}

fn timed_table(title: &str, events: &[&GameEvent], now: DateTime<Utc>) -> String {
    let rows: Vec<(String, String)> = events
        .iter()
        .map(|e| {
            (
                e.end_from_now_full(now).trim().to_string(),
                e.name_and_modifier.clone(),
            )
        })
        .collect();
    let time_w = rows
        .iter()
        .map(|(t, _)| t.len())
        .max()
        .unwrap_or(0)
        .max("Time".len());
    let name_w = rows
        .iter()
        .map(|(_, n)| n.len())
        .max()
        .unwrap_or(0)
        .max(title.len());

    let mut out = format!("{:>tw$}  {}", "Time", title, tw = time_w);
    out.push('\n');
    out.push_str(&"-".repeat(time_w + 2 + name_w));
    for (time, name) in &rows {
        out.push('\n');
        out.push_str(format!("{:>tw$}  {}", time, name, tw = time_w).trim_end());
    }
    out
}

fn active_rotation_table(title: &str, events: &[&GameEvent], now: DateTime<Utc>) -> String {
    let rows: Vec<(String, String, String)> = events
        .iter()
        .map(|e| {
            (
                e.name_and_modifier.clone(),
                e.group_long_name().to_string(),
                e.end_from_now_full(now).trim().to_string(),
            )
        })
        .collect();
    let name_w = rows
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .max(title.len());
    let group_w = rows
        .iter()
        .map(|r| r.1.len())
        .max()
        .unwrap_or(0)
        .max("Group".len());
    let time_w = rows
        .iter()
        .map(|r| r.2.len())
        .max()
        .unwrap_or(0)
        .max("Time".len());

    let mut out = format!(
        "{:<nw$}  {:<gw$}  {:>tw$}",
        title,
        "Group",
        "Time",
        nw = name_w,
        gw = group_w,
        tw = time_w
    );
    out.push('\n');
    out.push_str(&"-".repeat(name_w + group_w + time_w + 4));
    for (name, group, time) in &rows {
        out.push('\n');
        out.push_str(
            format!(
                "{:<nw$}  {:<gw$}  {:>tw$}",
                name,
                group,
                time,
                nw = name_w,
                gw = group_w,
                tw = time_w
            )
            .trim_end(),
        );
    }
    out
}

fn pending_rotation_table(events: &[&GameEvent], labels: &[&str]) -> String {
    let rows = rotation_rows(events, labels);
    let name_w = rows
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Pending".len());
    // HH:MM cells are five characters wide.
    let col_w: Vec<usize> = labels.iter().map(|l| l.len().max(5)).collect();

    let mut out = String::from("Times are PT below\n\n");
    out.push_str(&format!("{:<nw$}", "Pending", nw = name_w));
    for (label, w) in labels.iter().zip(&col_w) {
        out.push_str(&format!(" | {:<w$}", label, w = w));
    }
    out.push('\n');
    let total = name_w + col_w.iter().map(|w| w + 3).sum::<usize>();
    out.push_str(&"-".repeat(total));
    for row in &rows {
        out.push('\n');
        let mut line = format!("{:<nw$}", row.name, nw = name_w);
        for (cell, w) in row.cells.iter().zip(&col_w) {
            let text = cell.map(|e| e.guerrilla_cell()).unwrap_or_default();
            line.push_str(&format!(" | {:<w$}", text, w = w));
        }
        out.push_str(line.trim_end());
    }
    out
}
