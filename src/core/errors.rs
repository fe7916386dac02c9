use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to read input file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse input file {}: {source}", .path.display())]
    InputParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Dispatch error: {0}")]
    DispatchError(String),
}

impl From<tokio::sync::AcquireError> for CheckerError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        CheckerError::DispatchError(err.to_string())
    }
}

pub type CheckerResult<T> = Result<T, CheckerError>;

/// Why a single fetch attempt produced no HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl FetchError {
    /// Only transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FetchError::MalformedUrl(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::MalformedUrl(err.to_string())
    }
}
