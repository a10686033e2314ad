use std::sync::Arc;

use tokio::sync::RwLock;

use backend_domain::ports::{
    CatalogSource, DestinationSender, NameNormalizer, SubscriptionRepository,
};
use backend_domain::{RuntimeConfig, SubscriptionBook};

use crate::store::EventStore;
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<EventStore>,
    pub subscriptions: Arc<RwLock<SubscriptionBook>>,
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
    pub catalog: Arc<dyn CatalogSource>,
    pub sender: Arc<dyn DestinationSender>,
    pub normalizer: Arc<dyn NameNormalizer>,
    pub excluded_names: Arc<Vec<String>>,
    pub metrics: Arc<Metrics>,
}
