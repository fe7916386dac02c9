use crate::core::FetchError;
use crate::report::UrlReport;
use crate::StatsTracker;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::Instant;
use url::Url;

/// Parses `raw` into a URL an HTTP client can GET.
pub fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::MalformedUrl(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues one GET. `Ok` carries the status of any received response.
    async fn fetch_single(&self, url: Url) -> Result<u16, FetchError>;
    fn box_clone(&self) -> Box<dyn Fetcher>;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    /// Checks `raw_url`, retrying transport failures up to `retries_remaining` times.
    ///
    /// Each attempt is timed on its own; the report only reflects the last one.
    async fn fetch(&self, raw_url: &str, retries_remaining: usize) -> UrlReport {
        let url = match parse_target(raw_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping {}: {}", raw_url, e);
                return UrlReport::malformed(raw_url);
            }
        };

        let mut retries_remaining = retries_remaining;

        loop {
            debug!("Fetching URL: {}", url);
            let start = Instant::now();
            let outcome = self.fetch_single(url.clone()).await;
            let elapsed = start.elapsed().as_secs_f64();

            match outcome {
                Ok(status) => {
                    info!(
                        "Checked {} (status={}, time={:.3}s)",
                        raw_url, status, elapsed
                    );
                    return UrlReport::succeeded(raw_url, status, elapsed);
                }
                Err(e) if e.is_retryable() && retries_remaining > 0 => {
                    retries_remaining -= 1;
                    self.stats().record_retry();
                    warn!(
                        "Failed to reach {}: {}. Retrying ({} retries left)",
                        raw_url, e, retries_remaining
                    );
                }
                Err(FetchError::MalformedUrl(reason)) => {
                    warn!("Skipping {}: {}", raw_url, reason);
                    return UrlReport::malformed(raw_url);
                }
                Err(e) => {
                    warn!("Giving up on {}: {}", raw_url, e);
                    return UrlReport::failed(raw_url, elapsed);
                }
            }
        }
    }
}
