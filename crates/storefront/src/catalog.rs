//! Remote product catalog client.
//!
//! The catalog is read-only: one `GET` per Home-page request returning the
//! full product collection as a JSON array, order preserved. The client
//! enforces a request timeout and retries transport-level and server-side
//! failures a bounded number of times with linear backoff; both knobs come
//! from [`CatalogConfig`].

use std::sync::Arc;
use std::time::Duration;

use minimart_core::Product;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;

/// Errors that can occur when fetching the catalog.
///
/// All variants mean the same thing to callers (the catalog is
/// unavailable); the split exists for diagnostics.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the response body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(StatusCode),

    /// The response body was not a valid product array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Transport errors and server-side failures are worth retrying;
    /// client errors and malformed bodies are not.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status(status) => status.is_server_error(),
            Self::Parse(_) => false,
        }
    }
}

/// Client for the remote product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    retries: u32,
    backoff: Duration,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the underlying HTTP client cannot
    /// be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint: config.endpoint.clone(),
                retries: config.retries,
                backoff: config.backoff,
            }),
        })
    }

    /// Fetch the current product collection.
    ///
    /// Returns the products exactly as the catalog provides them: order
    /// preserved, no sorting, no filtering. Does not mutate any persisted
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` once the configured retries are exhausted
    /// (or immediately for non-retryable failures).
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once().await {
                Ok(products) => return Ok(products),
                Err(e) if attempt < self.inner.retries && e.is_retryable() => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "catalog fetch failed, retrying");
                    tokio::time::sleep(self.inner.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        match serde_json::from_str(&body) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(CatalogError::Status(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(CatalogError::Status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(!CatalogError::Status(StatusCode::NOT_FOUND).is_retryable());
        assert!(!CatalogError::Status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
    }
}
