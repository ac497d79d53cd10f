//! Session-scoped shopping cart.
//!
//! Each browser session owns exactly one cart, stored as a value in the
//! session store. Carts are intentionally non-persistent: they live and die
//! with the session cookie. Line items snapshot the product at the time it
//! was added, so later catalog edits do not change a cart in flight.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use kasanje_core::Product;

/// Session key under which the cart is stored.
const CART_SESSION_KEY: &str = "cart";

/// One line in a cart: a product snapshot and a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Snapshot of the product when it was added.
    pub product: Product,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal in whole currency units.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.product.price.line_total(self.quantity)
    }
}

/// A shopping cart: an ordered list of lines, newest additions last.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Cart lines in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Add a product to the cart.
    ///
    /// If a line for the same product already exists, the quantities merge
    /// into that line; otherwise a new line is appended. Quantities below 1
    /// are clamped to 1.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Set the quantity of an existing line, clamping values below 1 up
    /// to 1. Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id.as_str() == product_id)
        {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove the line for a product, if present.
    pub fn remove(&mut self, product_id: &str) {
        self.lines
            .retain(|line| line.product.id.as_str() != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Cart total in whole currency units.
    #[must_use]
    pub fn total_price(&self) -> i64 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Load the session's cart, defaulting to an empty one.
///
/// # Errors
///
/// Returns an error if the session store is unavailable.
pub async fn load(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(CART_SESSION_KEY)
        .await?
        .unwrap_or_default())
}

/// Persist the cart back into the session.
///
/// # Errors
///
/// Returns an error if the session store is unavailable.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_SESSION_KEY, cart).await
}
