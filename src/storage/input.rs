use crate::{CheckerError, CheckerResult};
use log::info;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct UrlList {
    urls: Vec<String>,
}

/// Reads the `{"urls": [...]}` input file.
pub async fn load_urls<P: AsRef<Path>>(path: P) -> CheckerResult<Vec<String>> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CheckerError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;

    let list: UrlList =
        serde_json::from_slice(&data).map_err(|source| CheckerError::InputParse {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Loaded {} URLs from {}", list.urls.len(), path.display());
    Ok(list.urls)
}
