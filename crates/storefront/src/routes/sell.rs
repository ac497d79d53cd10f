//! Seller listing submission.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::PRODUCTS_COLLECTION;
use crate::error::Result;
use crate::listing::NewListing;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Response for an accepted listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCreated {
    /// Store-assigned document id of the new product.
    pub id: String,
    /// User-facing confirmation message.
    pub message: &'static str,
}

/// `POST /sell` - validate and store a new product listing.
///
/// Requires a signed-in user; the listing is attributed to them. Validation
/// failures return a 422 with per-field messages before any write.
#[instrument(skip_all, fields(seller_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(listing): Json<NewListing>,
) -> Result<(StatusCode, Json<ListingCreated>)> {
    listing.validate()?;

    let fields = listing.document_fields(&user.id, user.display_name.as_deref());
    let document = state
        .firestore()
        .create_document(PRODUCTS_COLLECTION, fields)
        .await?;

    // New listing must show up on the seller's next read
    state.catalog().invalidate();

    info!(id = document.id(), "Listing created");
    Ok((
        StatusCode::CREATED,
        Json(ListingCreated {
            id: document.id().to_string(),
            message: "Your product is now live on the marketplace.",
        }),
    ))
}
