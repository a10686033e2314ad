use chrono::{DateTime, Utc};

use crate::entities::GameEvent;
use crate::value_objects::{DungeonKind, EventKind, GameServer};

/// Immutable, chainable filter view over a snapshot of events.
///
/// Every operation returns a new view over the same underlying snapshot;
/// chained calls share no mutable state and compose in any order.
#[derive(Debug, Clone)]
pub struct EventQuery<'a> {
    events: Vec<&'a GameEvent>,
}

impl<'a> EventQuery<'a> {
    pub fn new(events: &'a [GameEvent]) -> Self {
        Self {
            events: events.iter().collect(),
        }
    }

    /// Generic filter primitive. With `exclude` set the predicate becomes
    /// a denylist instead of an allowlist.
    pub fn retain(&self, pred: impl Fn(&GameEvent) -> bool, exclude: bool) -> Self {
        Self {
            events: self
                .events
                .iter()
                .copied()
                .filter(|e| pred(*e) != exclude)
                .collect(),
        }
    }

    pub fn with_server(&self, server: GameServer) -> Self {
        self.retain(|e| e.server == server, false)
    }

    pub fn with_kind(&self, kind: EventKind) -> Self {
        self.retain(|e| e.kind == kind, false)
    }

    pub fn in_kinds(&self, kinds: &[EventKind]) -> Self {
        let kinds = kinds.to_vec();
        self.retain(move |e| kinds.contains(&e.kind), false)
    }

    pub fn with_dungeon_kind(&self, kind: DungeonKind, exclude: bool) -> Self {
        self.retain(|e| e.dungeon_kind == kind, exclude)
    }

    /// Drops events whose display name contains any of the given lowercase
    /// fragments (the noise denylist).
    pub fn excluding_names(&self, fragments: &[String]) -> Self {
        self.retain(
            |e| {
                let name = e.name_and_modifier.to_lowercase();
                fragments.iter().any(|f| name.contains(f.as_str()))
            },
            true,
        )
    }

    pub fn started_only(&self, now: DateTime<Utc>) -> Self {
        self.retain(|e| e.is_started(now), false)
    }

    pub fn pending_only(&self, now: DateTime<Utc>) -> Self {
        self.retain(|e| e.is_pending(now), false)
    }

    pub fn active_only(&self, now: DateTime<Utc>) -> Self {
        self.retain(|e| e.is_active(now), false)
    }

    pub fn available_only(&self, now: DateTime<Utc>) -> Self {
        self.retain(|e| e.is_available(now), false)
    }

    pub fn items(&self) -> &[&'a GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Ordered by (open time, display name); the name breaks timestamp ties
    /// so output is deterministic.
    pub fn by_open_time(&self, descending: bool) -> Vec<&'a GameEvent> {
        let mut items = self.events.clone();
        items.sort_by(|a, b| {
            (a.open_time, a.name_and_modifier.as_str())
                .cmp(&(b.open_time, b.name_and_modifier.as_str()))
        });
        if descending {
            items.reverse();
        }
        items
    }

    /// Ordered by (close time, display name).
    pub fn by_close_time(&self, descending: bool) -> Vec<&'a GameEvent> {
        let mut items = self.events.clone();
        items.sort_by(|a, b| {
            (a.close_time, a.name_and_modifier.as_str())
                .cmp(&(b.close_time, b.name_and_modifier.as_str()))
        });
        if descending {
            items.reverse();
        }
        items
    }
}
