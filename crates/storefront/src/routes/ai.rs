//! AI flow route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body for the description flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    /// Name of the product to describe.
    pub product_name: String,
}

/// Response for the description flow.
#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    /// Generated product description.
    pub description: String,
}

/// Request body for the recommendation flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    /// Free-text summary of the user's browsing history.
    pub browsing_history: String,
    /// Free-text summary of the available catalog.
    pub product_catalog: String,
}

/// Response for the recommendation flow.
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// Free-text recommendations; no structured parsing is attempted.
    pub recommendations: String,
}

/// `POST /ai/description` - generate a short marketing description.
#[instrument(skip(state), fields(product_name = %request.product_name))]
pub async fn generate_description(
    State(state): State<AppState>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>> {
    if request.product_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please enter a product name first.".to_string(),
        ));
    }

    let description = state
        .generation()
        .generate_description(request.product_name.trim())
        .await?;
    Ok(Json(DescriptionResponse { description }))
}

/// `POST /ai/recommendations` - recommend products from browsing history.
#[instrument(skip_all)]
pub async fn recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>> {
    let recommendations = state
        .generation()
        .recommend_products(&request.browsing_history, &request.product_catalog)
        .await?;
    Ok(Json(RecommendationsResponse { recommendations }))
}
