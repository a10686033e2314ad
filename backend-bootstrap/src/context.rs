use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::warn;

use backend_application::{AppState, EventStore, Metrics};
use backend_domain::SubscriptionRepository;
use backend_infrastructure::{
    load_excluded_names, AppConfig, DefaultDestinationSender, DefaultNameNormalizer,
    HttpCatalogSource, SubscriptionFileRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let subscription_repo = Arc::new(SubscriptionFileRepository::new());
        let subscriptions = match subscription_repo
            .load(&runtime_config.subscriptions_path)
            .await
        {
            Ok(book) => book,
            Err(err) => {
                warn!("failed to load subscriptions, starting empty: {}", err);
                Default::default()
            }
        };
        let excluded_names = match load_excluded_names(&runtime_config.excluded_names_path).await {
            Ok(names) => names,
            Err(err) => {
                warn!("failed to load excluded names: {}", err);
                Vec::new()
            }
        };

        let catalog = Arc::new(HttpCatalogSource::new(
            runtime_config.catalog_url.clone(),
            runtime_config.request_timeout_seconds,
        )?);

        let state = AppState {
            config: runtime_config.clone(),
            store: Arc::new(EventStore::new()),
            subscriptions: Arc::new(RwLock::new(subscriptions)),
            subscription_repo,
            catalog,
            sender: Arc::new(DefaultDestinationSender::new(runtime_config)),
            normalizer: Arc::new(DefaultNameNormalizer::new()),
            excluded_names: Arc::new(excluded_names),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
