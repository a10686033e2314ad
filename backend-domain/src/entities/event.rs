// Scheduled game event entity

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::NameNormalizer;
use crate::utils::{fmt_days_hrs_mins_short, fmt_hrs_mins, fmt_time_short};
use crate::value_objects::{DungeonKind, EventKind, GameServer};

/// Raw scheduled-event record as returned by the event catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEventRecord {
    pub key: String,
    pub server: String,
    pub open_timestamp: i64,
    pub close_timestamp: i64,
    #[serde(default)]
    pub group: Option<String>,
    pub event_kind: i64,
    #[serde(default)]
    pub dungeon_kind: Option<i64>,
    #[serde(default)]
    pub dungeon_name: Option<String>,
    #[serde(default)]
    pub event_modifier: Option<String>,
}

#[derive(Debug, Error)]
pub enum EventBuildError {
    #[error("unsupported server '{0}'")]
    UnsupportedServer(String),
    #[error("unknown event kind code {0}")]
    UnknownKind(i64),
    #[error("unknown dungeon kind code {0}")]
    UnknownDungeonKind(i64),
    #[error("timestamp {0} out of range")]
    InvalidTimestamp(i64),
    #[error("open time {open} is after close time {close}")]
    InvalidWindow { open: i64, close: i64 },
}

/// One scheduled occurrence, immutable after construction.
///
/// `key` is the identity, stable across refreshes. Several events may share
/// a `name_and_modifier` and differ only by rotation `group` — that is the
/// pattern the rotation grid reassembles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub key: String,
    pub server: GameServer,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub group: String,
    pub kind: EventKind,
    pub dungeon_kind: DungeonKind,
    pub name_and_modifier: String,
}

impl GameEvent {
    pub fn from_record(
        record: &ScheduledEventRecord,
        normalizer: &dyn NameNormalizer,
    ) -> Result<Self, EventBuildError> {
        let server = GameServer::parse(&record.server)
            .map_err(|_| EventBuildError::UnsupportedServer(record.server.clone()))?;
        let kind = EventKind::from_code(record.event_kind)
            .ok_or(EventBuildError::UnknownKind(record.event_kind))?;
        let dungeon_kind = match record.dungeon_kind {
            None => DungeonKind::Unknown,
            Some(code) => DungeonKind::from_code(code)
                .ok_or(EventBuildError::UnknownDungeonKind(code))?,
        };
        if record.open_timestamp > record.close_timestamp {
            return Err(EventBuildError::InvalidWindow {
                open: record.open_timestamp,
                close: record.close_timestamp,
            });
        }
        let open_time = DateTime::<Utc>::from_timestamp(record.open_timestamp, 0)
            .ok_or(EventBuildError::InvalidTimestamp(record.open_timestamp))?;
        let close_time = DateTime::<Utc>::from_timestamp(record.close_timestamp, 0)
            .ok_or(EventBuildError::InvalidTimestamp(record.close_timestamp))?;

        let dungeon_name = record.dungeon_name.as_deref().unwrap_or("unknown_dungeon");
        let clean_name = normalizer.normalize(dungeon_name);
        let clean_modifier = record
            .event_modifier
            .as_deref()
            .unwrap_or("")
            .replace(['!', ' '], "");
        let name_and_modifier = if clean_modifier.is_empty() {
            clean_name
        } else {
            format!("{}, {}", clean_name, clean_modifier)
        };
        let group = record
            .group
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_uppercase();

        Ok(Self {
            key: record.key.clone(),
            server,
            open_time,
            close_time,
            group,
            kind,
            dungeon_kind,
            name_and_modifier,
        })
    }

    // Time-window predicates. The window is half-open: [open, close).
    // Always computed against the caller-supplied clock, never cached.

    /// True once the open time has passed.
    pub fn is_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.open_time
    }

    /// True once the close time has passed.
    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        now >= self.close_time
    }

    /// True between open and close time.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.is_started(now) && !self.is_finished(now)
    }

    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        !self.is_started(now)
    }

    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        !self.is_finished(now)
    }

    pub fn starts_in(&self, now: DateTime<Utc>) -> Duration {
        self.open_time - now
    }

    pub fn ends_in(&self, now: DateTime<Utc>) -> Duration {
        self.close_time - now
    }

    pub fn start_pacific(&self) -> DateTime<Tz> {
        self.open_time.with_timezone(&chrono_tz::US::Pacific)
    }

    pub fn start_eastern(&self) -> DateTime<Tz> {
        self.open_time.with_timezone(&chrono_tz::US::Eastern)
    }

    pub fn group_long_name(&self) -> &str {
        &self.group
    }

    pub fn group_short_name(&self) -> String {
        self.group
            .replace("RED", "R")
            .replace("BLUE", "B")
            .replace("GREEN", "G")
    }

    /// HH:MM start cell (Pacific) for the rotation grid.
    pub fn guerrilla_cell(&self) -> String {
        fmt_time_short(&self.start_pacific())
    }

    pub fn start_from_now(&self, now: DateTime<Utc>) -> String {
        fmt_hrs_mins(self.starts_in(now).num_seconds())
    }

    pub fn end_from_now(&self, now: DateTime<Utc>) -> String {
        fmt_hrs_mins(self.ends_in(now).num_seconds())
    }

    pub fn end_from_now_full(&self, now: DateTime<Utc>) -> String {
        fmt_days_hrs_mins_short(self.ends_in(now).num_seconds())
    }

    /// One line of the rotation digest.
    pub fn partial_line(&self, now: DateTime<Utc>) -> String {
        let group = self.group_short_name();
        if self.is_started(now) {
            format!(
                "{} {}   {}",
                group,
                self.end_from_now(now),
                self.name_and_modifier
            )
        } else {
            format!(
                "{} {} {} {} {}",
                group,
                fmt_time_short(&self.start_pacific()),
                fmt_time_short(&self.start_eastern()),
                self.start_from_now(now),
                self.name_and_modifier
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl NameNormalizer for Identity {
        fn normalize(&self, raw: &str) -> String {
            raw.to_string()
        }
    }

    fn record() -> ScheduledEventRecord {
        ScheduledEventRecord {
            key: "ev-1".to_string(),
            server: "NA".to_string(),
            open_timestamp: 1_700_000_000,
            close_timestamp: 1_700_003_600,
            group: Some("a".to_string()),
            event_kind: 3,
            dungeon_kind: Some(0),
            dungeon_name: Some("Sample Dungeon".to_string()),
            event_modifier: None,
        }
    }

    fn event() -> GameEvent {
        GameEvent::from_record(&record(), &Identity).unwrap()
    }

    #[test]
    fn predicates_at_exact_open_time() {
        let e = event();
        let now = e.open_time;
        assert!(e.is_started(now));
        assert!(!e.is_finished(now));
        assert!(e.is_active(now));
        assert!(!e.is_pending(now));
        assert!(e.is_available(now));
    }

    #[test]
    fn predicates_at_exact_close_time() {
        let e = event();
        let now = e.close_time;
        assert!(e.is_started(now));
        assert!(e.is_finished(now));
        assert!(!e.is_active(now));
        assert!(!e.is_available(now));
    }

    #[test]
    fn predicate_identities_hold_across_the_window() {
        let e = event();
        for offset in [-60i64, 0, 60, 3600, 3700] {
            let now = e.open_time + Duration::seconds(offset);
            assert_eq!(e.is_active(now), e.is_started(now) && !e.is_finished(now));
            assert_eq!(e.is_pending(now), !e.is_started(now));
            assert_eq!(e.is_available(now), !e.is_finished(now));
        }
    }

    #[test]
    fn build_uppercases_group_and_keeps_key() {
        let e = event();
        assert_eq!(e.group, "A");
        assert_eq!(e.key, "ev-1");
        assert_eq!(e.server, GameServer::Na);
        assert_eq!(e.kind, EventKind::Guerrilla);
    }

    #[test]
    fn build_appends_cleaned_modifier() {
        let mut rec = record();
        rec.event_modifier = Some("x2 Drops!".to_string());
        let e = GameEvent::from_record(&rec, &Identity).unwrap();
        assert_eq!(e.name_and_modifier, "Sample Dungeon, x2Drops");
    }

    #[test]
    fn build_falls_back_for_missing_dungeon_name() {
        let mut rec = record();
        rec.dungeon_name = None;
        let e = GameEvent::from_record(&rec, &Identity).unwrap();
        assert_eq!(e.name_and_modifier, "unknown_dungeon");
    }

    #[test]
    fn build_rejects_unsupported_server() {
        let mut rec = record();
        rec.server = "KR".to_string();
        assert!(matches!(
            GameEvent::from_record(&rec, &Identity),
            Err(EventBuildError::UnsupportedServer(_))
        ));
    }

    #[test]
    fn build_rejects_unknown_kind_codes() {
        let mut rec = record();
        rec.event_kind = 99;
        assert!(matches!(
            GameEvent::from_record(&rec, &Identity),
            Err(EventBuildError::UnknownKind(99))
        ));
    }

    #[test]
    fn build_rejects_inverted_window() {
        let mut rec = record();
        rec.close_timestamp = rec.open_timestamp - 1;
        assert!(matches!(
            GameEvent::from_record(&rec, &Identity),
            Err(EventBuildError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn missing_dungeon_kind_maps_to_unknown() {
        let mut rec = record();
        rec.dungeon_kind = None;
        let e = GameEvent::from_record(&rec, &Identity).unwrap();
        assert_eq!(e.dungeon_kind, DungeonKind::Unknown);
    }

    #[test]
    fn group_short_name_abbreviates_colors() {
        let mut e = event();
        e.group = "RED".to_string();
        assert_eq!(e.group_short_name(), "R");
        e.group = "GREEN".to_string();
        assert_eq!(e.group_short_name(), "G");
        e.group = "B".to_string();
        assert_eq!(e.group_short_name(), "B");
    }
}
