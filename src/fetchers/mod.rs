pub mod http_fetcher;
pub mod mock_fetcher;

mod fetcher;
pub use fetcher::{parse_target, Fetcher};
pub use http_fetcher::HttpFetcher;
pub use mock_fetcher::{MockFetcher, MockOutcome, MockResponse};
