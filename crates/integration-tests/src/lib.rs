//! Integration tests for Minimart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minimart-integration-tests
//! ```
//!
//! Every test is self-contained: it spins up a fake catalog service and a
//! real storefront server on ephemeral ports and drives them over HTTP
//! with `reqwest`. No external services, no shared state between tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use minimart_storefront::config::{CatalogConfig, StorefrontConfig};
use minimart_storefront::routes;
use minimart_storefront::state::AppState;
use minimart_storefront::storage::KeyValueStore;
use url::Url;

/// Serve a fixed payload at `/products` on an ephemeral port.
///
/// Returns the bound address; the server runs until the test process
/// exits.
pub async fn spawn_catalog(status: StatusCode, body: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/products",
        get(move || async move {
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    spawn_router(app).await
}

/// Serve an arbitrary router on an ephemeral port.
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("test server error");
    });

    addr
}

/// Storefront configuration pointing at a fake catalog.
///
/// Retries are off by default so failure tests stay fast; tests exercising
/// the retry path override `catalog.retries`.
#[must_use]
pub fn test_config(catalog_addr: SocketAddr) -> StorefrontConfig {
    let endpoint = Url::parse(&format!("http://{catalog_addr}/products"))
        .expect("catalog address forms a valid URL");

    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        // Unused: tests inject their storage explicitly.
        data_dir: std::env::temp_dir(),
        catalog: CatalogConfig {
            endpoint,
            timeout: Duration::from_secs(5),
            retries: 0,
            backoff: Duration::from_millis(10),
        },
    }
}

/// Boot a real storefront server with injected storage.
///
/// Returns its base URL (`http://127.0.0.1:<port>`).
pub async fn spawn_app(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> String {
    let state = AppState::with_storage(config, storage).expect("failed to build app state");
    let addr = spawn_router(routes::app(state)).await;
    format!("http://{addr}")
}

/// The single-product catalog payload used by the end-to-end scenarios.
pub const ONE_SHIRT: &str =
    r#"[{"id":1,"title":"Shirt","price":19.99,"image":"u","description":"d"}]"#;
