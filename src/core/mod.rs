mod checker;
pub mod config;
mod dispatching;
mod errors;

pub use checker::{check_urls, check_urls_with};
pub use config::CheckerConfig;
pub use dispatching::Dispatcher;
pub use errors::{CheckerError, CheckerResult, FetchError};
