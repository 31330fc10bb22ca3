//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use minimart_core::Product;
use tracing::instrument;

use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Plain decimal amount ("19.99"); templates prefix the currency sign.
    pub price: String,
    pub image: String,
    /// Detail link carrying the whole product as navigation parameters.
    pub detail_url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        // The full product rides in the query string so the detail page
        // needs no fetch and no state of its own.
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("title", &product.title)
            .append_pair("description", &product.description)
            .append_pair("price", &product.price.to_string())
            .append_pair("image", &product.image)
            .finish();

        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            detail_url: format!("/products/{}?{query}", product.id),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display the home page: the catalog collection as selectable cards.
///
/// A catalog failure is logged and the page renders with an empty
/// collection; there is no user-facing error and no automatic retry beyond
/// what the client itself performs.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> HomeTemplate {
    let products = match state.catalog().fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable, rendering empty product list");
            Vec::new()
        }
    };

    HomeTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
    }
}
