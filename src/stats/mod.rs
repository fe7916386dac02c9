use crate::report::{ReportKind, UrlReport};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct CheckStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_urls: usize,
    pub successful_checks: usize,
    pub failed_checks: usize,
    pub malformed_urls: usize,
    pub aborted_checks: usize,
    pub retry_count: usize,
    pub status_codes: HashMap<u16, usize>,
    pub average_response_time: f64, // in seconds, over reports that carry one
    #[serde(skip)]
    timed_reports: usize,
}

impl CheckStats {
    fn new() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            total_urls: 0,
            successful_checks: 0,
            failed_checks: 0,
            malformed_urls: 0,
            aborted_checks: 0,
            retry_count: 0,
            status_codes: HashMap::new(),
            average_response_time: 0.0,
            timed_reports: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CheckStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CheckStats::new())),
        }
    }

    /// Starts a fresh run; every clone of this tracker sees the reset.
    pub fn reset(&self) {
        *self.stats.write() = CheckStats::new();
    }

    pub fn record_report(&self, report: &UrlReport) {
        let mut stats = self.stats.write();
        stats.total_urls += 1;

        if report.success() {
            stats.successful_checks += 1;
        } else {
            stats.failed_checks += 1;
        }

        if let Some(status) = report.status_code() {
            *stats.status_codes.entry(status).or_insert(0) += 1;
        }

        match report.kind() {
            ReportKind::Malformed => stats.malformed_urls += 1,
            ReportKind::Aborted => stats.aborted_checks += 1,
            ReportKind::Response | ReportKind::TransportFailure => {}
        }

        if let Some(elapsed) = report.response_time() {
            stats.timed_reports += 1;
            let current_total = stats.average_response_time * (stats.timed_reports - 1) as f64;
            stats.average_response_time = (current_total + elapsed) / stats.timed_reports as f64;
        }
    }

    pub fn record_retry(&self) {
        self.stats.write().retry_count += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> CheckStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nCheck Statistics:");
        println!("=================");
        println!("Duration: {} ms", duration.num_milliseconds());
        println!("URLs Checked: {}", stats.total_urls);
        println!("Reachable: {}", stats.successful_checks);
        println!("Unreachable: {}", stats.failed_checks);
        println!("Malformed: {}", stats.malformed_urls);
        if stats.aborted_checks > 0 {
            println!("Aborted: {}", stats.aborted_checks);
        }
        println!("Retry Count: {}", stats.retry_count);
        println!(
            "Average Response Time: {:.3}s",
            stats.average_response_time
        );

        if !stats.status_codes.is_empty() {
            println!("\nStatus Codes:");
            let mut codes: Vec<_> = stats.status_codes.iter().collect();
            codes.sort();
            for (code, count) in codes {
                println!("  {}: {}", code, count);
            }
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
