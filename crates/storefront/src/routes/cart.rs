//! Cart route handlers.
//!
//! Every mutation responds with the full cart view so the client can
//! re-render without a follow-up read.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{self, Cart, CartLine};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data returned from every cart route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Cart lines in insertion order.
    pub items: Vec<CartLine>,
    /// Total number of units.
    pub count: u32,
    /// Cart total in whole currency units.
    pub total_price: i64,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            count: cart.count(),
            total_price: cart.total_price(),
            items: cart.lines,
        }
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    /// Product document id.
    pub product_id: String,
    /// Units to add; defaults to 1.
    pub quantity: Option<u32>,
}

/// Request body for setting a line's quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Product document id.
    pub product_id: String,
    /// New quantity; non-positive values are clamped to 1.
    pub quantity: i64,
}

/// Request body naming a product line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    /// Product document id.
    pub product_id: String,
}

/// `GET /cart` - current cart view.
#[instrument(skip_all)]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = cart::load(&session).await?;
    Ok(Json(cart.into()))
}

/// `POST /cart/add` - add a product by id, snapshotting it into the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get_product(&request.product_id)
        .await
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let mut cart = cart::load(&session).await?;
    cart.add(product, request.quantity.unwrap_or(1));
    cart::save(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// `POST /cart/update` - set a line's quantity (clamped to at least 1).
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<CartView>> {
    let mut cart = cart::load(&session).await?;
    // Negative input clamps to 1 the same way zero does
    let quantity = u32::try_from(request.quantity).unwrap_or(0);
    cart.update_quantity(&request.product_id, quantity);
    cart::save(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// `POST /cart/remove` - delete a line; no-op if absent.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<CartView>> {
    let mut cart = cart::load(&session).await?;
    cart.remove(&request.product_id);
    cart::save(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// `POST /cart/clear` - empty the cart.
#[instrument(skip_all)]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = cart::load(&session).await?;
    cart.clear();
    cart::save(&session, &cart).await?;
    Ok(Json(cart.into()))
}
