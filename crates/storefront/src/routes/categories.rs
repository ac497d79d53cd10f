//! Reference collection route handlers: categories and testimonials.

use axum::{Json, extract::State};
use tracing::instrument;

use kasanje_core::{Category, Testimonial};

use crate::state::AppState;

/// `GET /categories` - list all categories, ordered by name.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().get_categories().await)
}

/// `GET /testimonials` - list all testimonials.
#[instrument(skip(state))]
pub async fn testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.catalog().get_testimonials().await)
}
