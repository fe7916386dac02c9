use crate::core::FetchError;
use crate::StatsTracker;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::Fetcher;

#[derive(Clone, Debug)]
pub enum MockOutcome {
    Status(u16),
    TransportFailure,
}

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub outcome: MockOutcome,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn status(status: u16) -> Self {
        Self {
            outcome: MockOutcome::Status(status),
            delay: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            outcome: MockOutcome::TransportFailure,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Scripted fetcher that also tracks how many calls overlap.
///
/// Responses are served round-robin from a shared script, or from a per-host
/// script when one is registered for the URL's host.
#[derive(Clone)]
pub struct MockFetcher {
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    host_scripts: Arc<Mutex<HashMap<String, (Vec<MockResponse>, usize)>>>,
    calls: Arc<Mutex<Vec<Url>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    stats: Arc<StatsTracker>,
}

impl MockFetcher {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            host_scripts: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    /// Serves `responses` in order for `host`, repeating the last one once exhausted.
    pub fn with_host_script(self, host: &str, responses: Vec<MockResponse>) -> Self {
        self.host_scripts
            .lock()
            .insert(host.to_string(), (responses, 0));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn next_response(&self, url: &Url) -> Option<MockResponse> {
        if let Some(host) = url.host_str() {
            let mut scripts = self.host_scripts.lock();
            if let Some((script, cursor)) = scripts.get_mut(host) {
                let index = (*cursor).min(script.len().saturating_sub(1));
                *cursor += 1;
                return script.get(index).cloned();
            }
        }

        if self.responses.is_empty() {
            return None;
        }
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        Some(self.responses[index % self.responses.len()].clone())
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_single(&self, url: Url) -> Result<u16, FetchError> {
        self.calls.lock().push(url.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let response = self.next_response(&url);

        if let Some(delay) = response.as_ref().and_then(|r| r.delay) {
            sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match response.map(|r| r.outcome) {
            Some(MockOutcome::Status(status)) => Ok(status),
            Some(MockOutcome::TransportFailure) => {
                Err(FetchError::Transport("mock connection refused".to_string()))
            }
            None => Err(FetchError::Transport("no scripted response".to_string())),
        }
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
