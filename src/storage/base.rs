use crate::report::ReportCollection;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Operation error: {0}")]
    OperationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Persists the finished collection and returns where it was written.
    async fn store(&self, reports: &ReportCollection) -> Result<PathBuf, StorageError>;
}
