use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENCY: usize = 5;
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_INPUT_PATH: &str = "./urls.json";
pub const DEFAULT_OUTPUT_PATH: &str = "../output/url_report.json";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for a single checking run.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub max_concurrency: usize,
    /// Additional attempts after the first one fails at the transport level.
    pub max_retries: usize,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` leaves requests bounded only by the OS.
    pub request_timeout: Option<Duration>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_retries: DEFAULT_MAX_RETRIES,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl CheckerConfig {
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        if max_concurrency == 0 {
            warn!("Concurrency of 0 would never admit a request, using 1");
        }
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_input_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
