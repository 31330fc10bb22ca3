//! Cart route handlers.
//!
//! Each handler loads its own cart store from durable storage; there is no
//! cart state shared between requests. A failed persist is logged and the
//! request completes with the in-memory state; the divergence heals on the
//! next successful write.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::Redirect, Form};
use minimart_core::{CartLineItem, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::CartStore;
use crate::state::AppState;

/// Cart line-item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Plain decimal amount ("19.99"); templates prefix the currency sign.
    pub price: String,
    pub image: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
        }
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub items: Vec<CartItemView>,
    pub total: String,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartShowTemplate {
    let store = CartStore::load(state.storage());

    CartShowTemplate {
        items: store.items().iter().map(CartItemView::from).collect(),
        total: store.total().to_string(),
    }
}

/// Add a product to the cart, then return to the home page.
///
/// The form carries the full product; one submission appends one unit
/// line, duplicates included.
#[instrument(skip(state, product), fields(product_id = %product.id))]
pub async fn add(State(state): State<AppState>, Form(product): Form<Product>) -> Redirect {
    let mut store = CartStore::load(state.storage());

    if let Err(e) = store.add(&product) {
        tracing::error!(error = %e, "failed to persist cart after add");
    }

    Redirect::to("/")
}

/// Remove every unit of a product from the cart, then show the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Redirect {
    let mut store = CartStore::load(state.storage());

    if let Err(e) = store.remove(form.id) {
        tracing::error!(error = %e, "failed to persist cart after remove");
    }

    Redirect::to("/cart")
}
