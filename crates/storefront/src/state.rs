//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::storage::{FileStore, KeyValueStore, StorageError};

/// Error building the application state.
#[derive(Debug, Error)]
pub enum AppStateError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the catalog client and the injected
/// durable store the per-request cart stores load from.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    storage: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Create the production state: file-backed storage under the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the data
    /// directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppStateError> {
        let storage = Arc::new(FileStore::new(&config.data_dir)?);
        Ok(Self::with_storage(config, storage)?)
    }

    /// Create state with an injected store (test doubles go here).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a handle to the durable key-value store.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner.storage)
    }
}
