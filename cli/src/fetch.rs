#![deny(missing_docs)]

//! # Document Fetching
//!
//! Reads the raw AsyncAPI document from disk or, with the `client` feature,
//! over HTTP.

use asyncdoc_core::{AppError, AppResult, DocumentFetcher};
use std::fs;
use url::Url;

/// Reads documents from the local filesystem.
pub struct FileFetcher;

impl DocumentFetcher for FileFetcher {
    fn fetch(&self, source: &str) -> AppResult<String> {
        fs::read_to_string(source)
            .map_err(|e| AppError::General(format!("Failed to read '{}': {}", source, e)))
    }
}

/// Fetches documents with a blocking HTTP GET.
#[cfg(feature = "client")]
pub struct HttpFetcher;

#[cfg(feature = "client")]
impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> AppResult<String> {
        let mut response = ureq::get(source)
            .call()
            .map_err(|e| AppError::General(format!("Failed to fetch '{}': {}", source, e)))?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| AppError::General(format!("Failed to read body of '{}': {}", source, e)))
    }
}

/// Dispatches to [`FileFetcher`] or `HttpFetcher` based on the source.
pub struct SourceFetcher;

impl DocumentFetcher for SourceFetcher {
    fn fetch(&self, source: &str) -> AppResult<String> {
        if !is_remote(source) {
            return FileFetcher.fetch(source);
        }
        tracing::debug!(source, "fetching remote document");

        #[cfg(feature = "client")]
        {
            HttpFetcher.fetch(source)
        }
        #[cfg(not(feature = "client"))]
        {
            Err(AppError::General(format!(
                "Cannot fetch '{}': built without the `client` feature",
                source
            )))
        }
    }
}

/// True for `http://` and `https://` sources.
pub fn is_remote(source: &str) -> bool {
    Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
