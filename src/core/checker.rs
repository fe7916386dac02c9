use super::config::CheckerConfig;
use super::dispatching::Dispatcher;
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::report::ReportCollection;
use crate::storage::{load_urls, DiskStorage, ReportStorage};
use crate::CheckerResult;
use log::{error, info};

/// Runs a full check: load the input file, check every URL, write the report.
///
/// Only a failure to load the input is returned as an error. A failed write
/// is logged and the in-memory reports are still returned.
pub async fn check_urls(config: &CheckerConfig) -> CheckerResult<ReportCollection> {
    let fetcher = HttpFetcher::new(config.request_timeout)?;
    let storage = DiskStorage::new(&config.output_path);
    check_urls_with(Box::new(fetcher), &storage, config).await
}

pub async fn check_urls_with(
    fetcher: Box<dyn Fetcher>,
    storage: &dyn ReportStorage,
    config: &CheckerConfig,
) -> CheckerResult<ReportCollection> {
    let urls = load_urls(&config.input_path).await?;

    let dispatcher = Dispatcher::new(fetcher, config.max_retries);
    let reports = dispatcher.run(&urls, config.max_concurrency).await?;
    dispatcher.stats().print_summary();

    match storage.store(&reports).await {
        Ok(path) => info!("Report saved to {}", path.display()),
        Err(e) => error!("Failed to save report: {}", e),
    }

    Ok(reports)
}
