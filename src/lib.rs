pub mod core;
pub mod fetchers;
pub mod report;
pub mod stats;
pub mod storage;

pub use crate::core::{check_urls, CheckerConfig, Dispatcher};
pub use crate::core::{CheckerError, CheckerResult, FetchError};
pub use fetchers::{Fetcher, HttpFetcher};
pub use report::{ReportCollection, UrlReport};
pub use stats::StatsTracker;
pub use storage::DiskStorage;
