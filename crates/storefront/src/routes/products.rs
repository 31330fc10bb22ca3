//! Product detail route handler.
//!
//! The detail page is a pure function of its navigation parameters: the
//! selected product arrives in full (path id + query fields), so the page
//! performs no fetch and holds no state.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query};
use minimart_core::Price;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Navigation parameters carrying the selected product.
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub image: String,
}

/// Product display data for the detail template.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Display the product passed in the navigation parameters.
pub async fn show(
    Path(id): Path<u64>,
    params: std::result::Result<Query<DetailParams>, QueryRejection>,
) -> Result<ProductShowTemplate> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    Ok(ProductShowTemplate {
        product: ProductDetailView {
            id: id.to_string(),
            title: params.title,
            description: params.description,
            price: params.price.to_string(),
            image: params.image,
        },
    })
}
