// Shared fixtures for application-level tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use backend_domain::{
    CatalogSource, DestinationSender, DungeonKind, EventKind, GameEvent, GameServer,
    NameNormalizer, RuntimeConfig, ScheduledEventRecord, SubscriptionBook,
    SubscriptionRepository,
};

use crate::{AppState, EventStore, Metrics};

pub struct StubCatalog {
    pub records: Vec<ScheduledEventRecord>,
    pub fail: bool,
}

impl StubCatalog {
    pub fn with_records(records: Vec<ScheduledEventRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_scheduled_events(&self) -> anyhow::Result<Vec<ScheduledEventRecord>> {
        if self.fail {
            anyhow::bail!("catalog unavailable");
        }
        Ok(self.records.clone())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("catalog unavailable");
        }
        Ok(())
    }
}

/// Records every send attempt; destinations listed in `failing` reject the
/// message after the attempt is recorded.
#[derive(Default)]
pub struct RecordingSender {
    pub attempts: Mutex<Vec<(String, String)>>,
    pub failing: HashSet<String>,
}

impl RecordingSender {
    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            failing: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl DestinationSender for RecordingSender {
    async fn send(&self, destination_id: &str, text: &str) -> anyhow::Result<()> {
        self.attempts
            .lock()
            .await
            .push((destination_id.to_string(), text.to_string()));
        if self.failing.contains(destination_id) {
            anyhow::bail!("destination rejected message");
        }
        Ok(())
    }

    async fn check_target(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct IdentityNormalizer;

impl NameNormalizer for IdentityNormalizer {
    fn normalize(&self, raw: &str) -> String {
        raw.to_string()
    }
}

pub struct NullSubscriptionRepo;

#[async_trait]
impl SubscriptionRepository for NullSubscriptionRepo {
    async fn load(&self, _path: &str) -> anyhow::Result<SubscriptionBook> {
        Ok(SubscriptionBook::default())
    }

    async fn save(&self, _path: &str, _book: &SubscriptionBook) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        catalog_url: "http://127.0.0.1:0/v1/scheduled-events".to_string(),
        subscriptions_path: "./subscriptions.json".to_string(),
        excluded_names_path: "./excluded_names.yaml".to_string(),
        sender_webhook_url: None,
        sender_webhook_template: None,
        sender_webhook_token: None,
        refresh_interval_minutes: 60,
        notify_interval_seconds: 10,
        request_timeout_seconds: 5,
        max_body_bytes: 1024 * 1024,
        max_message_len: 1980,
    }
}

pub fn state_with(
    catalog: Arc<dyn CatalogSource>,
    sender: Arc<dyn DestinationSender>,
    book: SubscriptionBook,
) -> AppState {
    AppState {
        config: runtime_config(),
        store: Arc::new(EventStore::new()),
        subscriptions: Arc::new(RwLock::new(book)),
        subscription_repo: Arc::new(NullSubscriptionRepo),
        catalog,
        sender,
        normalizer: Arc::new(IdentityNormalizer),
        excluded_names: Arc::new(Vec::new()),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn event_at(
    key: &str,
    server: GameServer,
    kind: EventKind,
    group: &str,
    open: DateTime<Utc>,
    close: DateTime<Utc>,
    name: &str,
) -> GameEvent {
    GameEvent {
        key: key.to_string(),
        server,
        open_time: open,
        close_time: close,
        group: group.to_string(),
        kind,
        dungeon_kind: DungeonKind::Unknown,
        name_and_modifier: name.to_string(),
    }
}

/// An event that opened one second ago and closes in an hour.
pub fn started_event(
    key: &str,
    server: GameServer,
    kind: EventKind,
    group: &str,
    name: &str,
) -> GameEvent {
    let now = Utc::now();
    event_at(
        key,
        server,
        kind,
        group,
        now - Duration::seconds(1),
        now + Duration::hours(1),
        name,
    )
}

pub fn record(key: &str, server: &str, open: i64, close: i64, kind: i64) -> ScheduledEventRecord {
    ScheduledEventRecord {
        key: key.to_string(),
        server: server.to_string(),
        open_timestamp: open,
        close_timestamp: close,
        group: Some("A".to_string()),
        event_kind: kind,
        dungeon_kind: Some(0),
        dungeon_name: Some("Sample Dungeon".to_string()),
        event_modifier: None,
    }
}
