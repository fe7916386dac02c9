use super::base::{ReportStorage, StorageError};
use crate::report::ReportCollection;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes the report as a pretty-printed JSON array to a single file.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    path: PathBuf,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::OperationError(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}

#[async_trait]
impl ReportStorage for DiskStorage {
    async fn store(&self, reports: &ReportCollection) -> Result<PathBuf, StorageError> {
        let json = serde_json::to_string_pretty(reports)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, json).await?;
        debug!("Wrote {} reports to {}", reports.len(), self.path.display());
        Ok(self.path.clone())
    }
}
