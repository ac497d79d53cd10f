//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use kasanje_core::Product;

use crate::catalog::ProductFilter;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query string options for the product list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Exact category name.
    pub category: Option<String>,
    /// Filter to featured products.
    pub featured: Option<bool>,
    /// Filter to a single seller's listings.
    pub seller_id: Option<String>,
    /// Maximum number of results.
    pub limit: Option<i64>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        Self {
            category: query.category,
            featured: query.featured,
            seller_id: query.seller_id,
            limit: query.limit,
        }
    }
}

/// `GET /products` - list products, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let products = state.catalog().get_products(&query.into()).await;
    Json(products)
}

/// `GET /products/{id}` - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get_product(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
}
