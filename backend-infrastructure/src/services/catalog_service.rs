use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use backend_domain::{CatalogSource, ScheduledEventRecord};

/// Event catalog over HTTP: a GET returning the scheduled-event list as
/// JSON.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_scheduled_events(&self) -> Result<Vec<ScheduledEventRecord>> {
        let records = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<ScheduledEventRecord>>()
            .await?;
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
