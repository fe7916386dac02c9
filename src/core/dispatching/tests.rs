use crate::core::dispatching::Dispatcher;
use crate::core::FetchError;
use crate::fetchers::{Fetcher, MockFetcher, MockResponse};
use crate::report::ReportKind;
use crate::StatsTracker;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

fn urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("http://host{}.example.com/", i))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_never_exceeds_limit() {
    let fetcher =
        MockFetcher::new(vec![MockResponse::status(200).with_delay(Duration::from_millis(50))]);
    let dispatcher = Dispatcher::new(Box::new(fetcher.clone()), 3);

    let reports = dispatcher.run(&urls(20), 3).await.unwrap();

    assert_eq!(reports.len(), 20);
    assert_eq!(fetcher.peak_in_flight(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_single_slot_serializes_checks() {
    let fetcher =
        MockFetcher::new(vec![MockResponse::status(200).with_delay(Duration::from_millis(10))]);
    let dispatcher = Dispatcher::new(Box::new(fetcher.clone()), 0);

    dispatcher.run(&urls(5), 1).await.unwrap();

    assert_eq!(fetcher.peak_in_flight(), 1);
    assert_eq!(fetcher.call_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_retries_hold_their_slot() {
    let fetcher = MockFetcher::new(vec![
        MockResponse::failure().with_delay(Duration::from_millis(10)),
        MockResponse::status(200).with_delay(Duration::from_millis(10)),
    ]);
    let dispatcher = Dispatcher::new(Box::new(fetcher.clone()), 3);

    let reports = dispatcher.run(&urls(8), 2).await.unwrap();

    assert_eq!(reports.len(), 8);
    assert!(fetcher.peak_in_flight() <= 2);
}

#[tokio::test]
async fn test_one_report_per_url_in_input_order() {
    let fetcher = MockFetcher::new(vec![MockResponse::status(200)])
        .with_host_script("down.example.com", vec![MockResponse::failure()])
        .with_host_script("gone.example.com", vec![MockResponse::status(404)]);
    let dispatcher = Dispatcher::new(Box::new(fetcher.clone()), 2);

    let input = vec![
        "http://up.example.com".to_string(),
        "http://down.example.com".to_string(),
        "not a url".to_string(),
        "http://gone.example.com".to_string(),
    ];
    let reports = dispatcher.run(&input, 5).await.unwrap();

    let order: Vec<&str> = reports.iter().map(|r| r.url()).collect();
    assert_eq!(
        order,
        vec![
            "http://up.example.com",
            "http://down.example.com",
            "not a url",
            "http://gone.example.com",
        ]
    );

    let by_url: Vec<(Option<u16>, bool)> = reports
        .iter()
        .map(|r| (r.status_code(), r.success()))
        .collect();
    assert_eq!(
        by_url,
        vec![(Some(200), true), (None, false), (None, false), (Some(404), true)]
    );

    for report in &reports {
        assert_eq!(report.success(), report.status_code().is_some());
    }

    // 1 + (1 + 2 retries) + 0 + 1
    assert_eq!(fetcher.call_count(), 5);
}

#[tokio::test]
async fn test_duplicate_urls_get_separate_reports() {
    let fetcher = MockFetcher::new(vec![MockResponse::status(200)]);
    let dispatcher = Dispatcher::new(Box::new(fetcher), 3);

    let input = vec!["http://a".to_string(), "http://a".to_string()];
    let reports = dispatcher.run(&input, 5).await.unwrap();

    assert_eq!(reports.len(), 2);
}

#[tokio::test]
async fn test_empty_input() {
    let fetcher = MockFetcher::new(vec![MockResponse::status(200)]);
    let dispatcher = Dispatcher::new(Box::new(fetcher.clone()), 3);

    let reports = dispatcher.run(&[], 5).await.unwrap();

    assert!(reports.is_empty());
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_stats_cover_only_the_latest_run() {
    let fetcher = MockFetcher::new(vec![MockResponse::status(200)]).with_host_script(
        "flaky.example.com",
        vec![MockResponse::failure(), MockResponse::status(200)],
    );
    let dispatcher = Dispatcher::new(Box::new(fetcher), 3);

    let input = vec![
        "http://flaky.example.com".to_string(),
        "http://up.example.com".to_string(),
        "not a url".to_string(),
    ];
    dispatcher.run(&input, 2).await.unwrap();
    let first = dispatcher.stats().get_stats();

    dispatcher.run(&input[1..], 2).await.unwrap();
    let second = dispatcher.stats().get_stats();

    assert_eq!(first.total_urls, 3);
    assert_eq!(first.retry_count, 1);
    assert_eq!(second.total_urls, 2);
    assert_eq!(second.successful_checks, 1);
    assert_eq!(second.malformed_urls, 1);
    assert_eq!(second.retry_count, 0);
    assert!(second.start_time >= first.start_time);
}

#[tokio::test]
async fn test_stats_are_shared_with_fetcher() {
    let fetcher = MockFetcher::new(vec![MockResponse::status(200)])
        .with_host_script(
            "flaky.example.com",
            vec![MockResponse::failure(), MockResponse::status(200)],
        );
    let dispatcher = Dispatcher::new(Box::new(fetcher), 3);

    let input = vec![
        "http://flaky.example.com".to_string(),
        "http://up.example.com".to_string(),
    ];
    dispatcher.run(&input, 5).await.unwrap();

    let stats = dispatcher.stats().get_stats();
    assert_eq!(stats.total_urls, 2);
    assert_eq!(stats.successful_checks, 2);
    assert_eq!(stats.retry_count, 1);
    assert!(stats.end_time.is_some());
}

/// Panics for one host so the dispatcher has to cope with a lost task.
#[derive(Clone)]
struct PanickingFetcher {
    stats: Arc<StatsTracker>,
}

#[async_trait]
impl Fetcher for PanickingFetcher {
    async fn fetch_single(&self, url: Url) -> Result<u16, FetchError> {
        if url.host_str() == Some("boom.example.com") {
            panic!("fetcher blew up");
        }
        Ok(200)
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

#[tokio::test]
async fn test_panicked_check_still_yields_a_report() {
    let fetcher = PanickingFetcher {
        stats: Arc::new(StatsTracker::new()),
    };
    let dispatcher = Dispatcher::new(Box::new(fetcher), 3);

    let input = vec![
        "http://ok.example.com".to_string(),
        "http://boom.example.com".to_string(),
        "http://also-ok.example.com".to_string(),
    ];
    let reports = dispatcher.run(&input, 1).await.unwrap();

    assert_eq!(reports.len(), 3);
    let urls: HashSet<&str> = reports.iter().map(|r| r.url()).collect();
    assert_eq!(urls.len(), 3);

    let failed: Vec<_> = reports.iter().filter(|r| !r.success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].url(), "http://boom.example.com");
    assert!(failed[0].status_code().is_none());
    assert_eq!(failed[0].kind(), ReportKind::Aborted);

    let stats = dispatcher.stats().get_stats();
    assert_eq!(stats.aborted_checks, 1);
    assert_eq!(stats.malformed_urls, 0);
}
