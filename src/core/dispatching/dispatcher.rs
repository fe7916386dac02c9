use crate::fetchers::Fetcher;
use crate::report::{ReportCollection, UrlReport};
use crate::stats::StatsTracker;
use crate::CheckerResult;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::spawn;
use tokio::sync::Semaphore;

/// Drives a [`Fetcher`] over a list of URLs with bounded parallelism.
pub struct Dispatcher {
    fetcher: Box<dyn Fetcher>,
    max_retries: usize,
    stats: Arc<StatsTracker>,
}

impl Dispatcher {
    pub fn new(fetcher: Box<dyn Fetcher>, max_retries: usize) -> Self {
        info!("Initializing dispatcher");
        let stats = Arc::new(StatsTracker::new());
        let mut fetcher = fetcher;
        fetcher.set_stats(Arc::clone(&stats));

        Self {
            fetcher,
            max_retries,
            stats,
        }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Checks every URL and returns one report per input, in input order.
    ///
    /// Submission blocks while `max_concurrency` checks are in flight. The
    /// call returns once every spawned check has finished. Stats cover the
    /// latest run only.
    pub async fn run(
        &self,
        urls: &[String],
        max_concurrency: usize,
    ) -> CheckerResult<ReportCollection> {
        if max_concurrency == 0 {
            warn!("Concurrency of 0 would never admit a request, using 1");
        }
        let max_concurrency = max_concurrency.max(1);
        self.stats.reset();
        let gate = Arc::new(Semaphore::new(max_concurrency));
        let collected: Arc<Mutex<Vec<(usize, UrlReport)>>> =
            Arc::new(Mutex::new(Vec::with_capacity(urls.len())));
        let mut futures = FuturesUnordered::new();

        info!(
            "Checking {} URLs (concurrency={}, retries={})",
            urls.len(),
            max_concurrency,
            self.max_retries
        );

        for (index, url) in urls.iter().enumerate() {
            if gate.available_permits() == 0 {
                debug!(
                    "Reached concurrent request limit {}, waiting for slot",
                    max_concurrency
                );
            }
            let permit = Arc::clone(&gate).acquire_owned().await?;

            let fetcher = self.fetcher.box_clone();
            let collected = Arc::clone(&collected);
            let url = url.clone();
            let retries = self.max_retries;

            futures.push(spawn(async move {
                let report = fetcher.fetch(&url, retries).await;
                collected.lock().push((index, report));
                drop(permit);
            }));
        }

        while let Some(result) = futures.next().await {
            if let Err(e) = result {
                warn!("Check task error: {}", e);
            }
        }

        let entries = std::mem::take(&mut *collected.lock());
        let reports = ReportCollection::from_indexed(entries, urls);

        for report in &reports {
            self.stats.record_report(report);
        }
        self.stats.finish();

        info!(
            "All checks completed: {} reachable, {} unreachable",
            reports.succeeded(),
            reports.failed()
        );
        Ok(reports)
    }
}
