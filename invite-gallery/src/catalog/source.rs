//! Where the catalog's JSON document comes from

use super::types::TemplateData;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure while fetching or decoding the template data document
///
/// Cloneable so a single failed load can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("failed to fetch templates: {0}")]
    Fetch(String),

    /// The data resource answered with a non-success status
    #[error("failed to load templates: {status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// The local data file could not be read
    #[error("failed to read template data from {path}: {message}")]
    Read {
        /// File that was read
        path: String,
        /// Underlying I/O error
        message: String,
    },

    /// The document is not a valid template data document
    #[error("invalid template data: {0}")]
    Parse(String),
}

/// Fetches the template data document
///
/// The catalog calls [`fetch`](TemplateSource::fetch) at most once per
/// in-flight load; implementations do not cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch and decode the full document
    async fn fetch(&self) -> Result<TemplateData, LoadError>;
}

/// Loads `data.json` over HTTP
#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTemplateSource {
    /// Create a source for `url` with no request timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a source for `url` whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// URL of the data resource
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self) -> Result<TemplateData, LoadError> {
        tracing::debug!(url = %self.url, "Fetching template data");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<TemplateData>()
            .await
            .map_err(|e| LoadError::Parse(e.to_string()))
    }
}

/// Loads `data.json` from the local filesystem
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn fetch(&self) -> Result<TemplateData, LoadError> {
        tracing::debug!(path = %self.path.display(), "Reading template data");

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::Read {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse(e.to_string()))
    }
}
