//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Catalog
//! GET  /products               - Product list (?category=&featured=&sellerId=&limit=)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category list
//! GET  /testimonials           - Testimonial list
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Current cart view
//! POST /cart/add               - Add a product by id
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Selling (requires auth)
//! POST /sell                   - Submit a new listing
//!
//! # Auth
//! POST /auth/signin            - Email/password sign-in
//! POST /auth/signup            - Create an account
//! POST /auth/signout           - Clear the session user
//! GET  /auth/me                - Current user or 401
//!
//! # AI flows
//! POST /ai/description         - Generate a product description
//! POST /ai/recommendations     - Recommend products from browsing history
//! ```

pub mod ai;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
pub mod sell;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(categories::index))
        .route("/testimonials", get(categories::testimonials))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(auth::sign_in))
        .route("/signup", post(auth::sign_up))
        .route("/signout", post(auth::sign_out))
        .route("/me", get(auth::me))
}

/// Create the AI flow routes router.
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/description", post(ai::generate_description))
        .route("/recommendations", post(ai::recommendations))
}

/// Create the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .route("/sell", post(sell::create))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/ai", ai_routes())
}
