use async_trait::async_trait;

use crate::entities::SubscriptionBook;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn load(&self, path: &str) -> anyhow::Result<SubscriptionBook>;
    async fn save(&self, path: &str, book: &SubscriptionBook) -> anyhow::Result<()>;
}
