//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (product list + add to cart)
//! GET  /health           - Health check
//!
//! # Products
//! GET  /products/{id}    - Product detail (product passed as parameters)
//!
//! # Cart
//! GET  /cart             - Cart page (line-items + total)
//! POST /cart/add         - Add to cart, redirect to home
//! POST /cart/remove      - Remove all units of a product, redirect to cart
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all screen routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
