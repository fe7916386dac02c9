use async_trait::async_trait;
use log::debug;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::Fetcher;
use crate::core::FetchError;
use crate::{CheckerResult, StatsTracker};

const DEFAULT_USER_AGENT: &str = concat!("urlcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    stats: Arc<StatsTracker>,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> CheckerResult<Self> {
        let mut builder = ClientBuilder::new().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            stats: Arc::new(StatsTracker::new()),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_single(&self, url: Url) -> Result<u16, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();

        // The status is already in hand; a broken body does not undo that.
        match response.bytes().await {
            Ok(body) => debug!("Read {} bytes from {}", body.len(), url),
            Err(e) => debug!("Discarding unreadable body from {}: {}", url, e),
        }

        Ok(status)
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
