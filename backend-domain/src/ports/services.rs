use async_trait::async_trait;

use crate::entities::ScheduledEventRecord;

/// The upstream event catalog. Fetch failures are retryable; the caller
/// keeps its prior snapshot and tries again next cycle.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_scheduled_events(&self) -> anyhow::Result<Vec<ScheduledEventRecord>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Outbound notification transport. Best-effort: a failed send is the
/// caller's signal to log and move on, never to retry.
#[async_trait]
pub trait DestinationSender: Send + Sync {
    async fn send(&self, destination_id: &str, text: &str) -> anyhow::Result<()>;
    async fn check_target(&self) -> anyhow::Result<()>;
}

/// Cosmetic display-name rewrite. Pure and opaque to the core.
pub trait NameNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}
