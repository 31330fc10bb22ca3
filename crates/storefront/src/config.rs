//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local storefront against
//! the public demo catalog.
//!
//! - `MINIMART_HOST` - Bind address (default: 127.0.0.1)
//! - `MINIMART_PORT` - Listen port (default: 3000)
//! - `MINIMART_DATA_DIR` - Directory for durable cart storage (default: ./data)
//! - `CATALOG_URL` - Product catalog endpoint (default: <https://fakestoreapi.com/products>)
//! - `CATALOG_TIMEOUT_SECS` - Per-request catalog timeout (default: 10)
//! - `CATALOG_RETRIES` - Retries after a failed catalog fetch (default: 2)
//! - `CATALOG_BACKOFF_MS` - Base backoff between retries (default: 500)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the durable key-value files (the cart lives here)
    pub data_dir: PathBuf,
    /// Remote product catalog configuration
    pub catalog: CatalogConfig,
}

/// Remote product catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog collection endpoint, fetched with a plain GET
    pub endpoint: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// How many times a failed fetch is retried before giving up
    pub retries: u32,
    /// Base backoff between retries (grows linearly per attempt)
    pub backoff: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env_or("MINIMART_HOST", "127.0.0.1")?,
            port: parse_env_or("MINIMART_PORT", "3000")?,
            data_dir: PathBuf::from(get_env_or_default("MINIMART_DATA_DIR", "./data")),
            catalog: CatalogConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = parse_env_or("CATALOG_URL", DEFAULT_CATALOG_URL)?;
        let timeout_secs: u64 = parse_env_or("CATALOG_TIMEOUT_SECS", "10")?;
        let retries: u32 = parse_env_or("CATALOG_RETRIES", "2")?;
        let backoff_ms: u64 = parse_env_or("CATALOG_BACKOFF_MS", "500")?;

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            retries,
            backoff: Duration::from_millis(backoff_ms),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable (or its default) parsed into `T`.
fn parse_env_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

/// Parse a raw string value, attributing errors to the variable name.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_host() {
        let host: IpAddr = parse_value("MINIMART_HOST", "0.0.0.0").unwrap();
        assert_eq!(host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_parse_value_invalid_port() {
        let result: Result<u16, _> = parse_value("MINIMART_PORT", "not-a-port");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MINIMART_PORT"));
    }

    #[test]
    fn test_parse_value_catalog_url() {
        let url: Url = parse_value("CATALOG_URL", DEFAULT_CATALOG_URL).unwrap();
        assert_eq!(url.host_str(), Some("fakestoreapi.com"));
    }

    #[test]
    fn test_parse_value_rejects_bad_url() {
        let result: Result<Url, _> = parse_value("CATALOG_URL", "not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            catalog: CatalogConfig {
                endpoint: Url::parse(DEFAULT_CATALOG_URL).unwrap(),
                timeout: Duration::from_secs(10),
                retries: 2,
                backoff: Duration::from_millis(500),
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
