//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Home page (product grid)
//! GET  /health         - Liveness check
//! GET  /health/ready   - Readiness check (catalog API reachability)
//!
//! # Catalog
//! GET  /product/{id}   - Product detail
//! GET  /categories     - Category grid
//! GET  /category/{id}  - Products in one category
//! GET  /search         - Search page (?q= triggers the search)
//!
//! # Cart (HTMX fragments)
//! GET  /cart           - Cart page (hydrates lines from the catalog)
//! POST /cart/add       - Add product (returns count badge, triggers cart-updated)
//! POST /cart/update    - Update quantity (returns cart_items fragment)
//! POST /cart/remove    - Remove line (returns cart_items fragment)
//! GET  /cart/count     - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout       - Checkout form + order summary
//! POST /checkout       - Submit order to the API
//! GET  /thank-you      - Order confirmation
//!
//! # Chat widget (HTMX fragment)
//! POST /chat/send      - One request/response exchange with the chatbot
//!
//! Anything else        - 404 page
//! ```

pub mod cart;
pub mod categories;
pub mod chat;
pub mod checkout;
pub mod home;
pub mod products;
pub mod search;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::breadcrumb::{self, Crumb};
use crate::filters;
use crate::state::AppState;

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub crumbs: Vec<Crumb>,
    pub message: String,
}

/// Fallback handler for unknown routes.
pub async fn not_found(uri: axum::http::Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            crumbs: breadcrumb::trail(uri.path()),
            message: "Sorry, the page you're looking for doesn't exist.".to_string(),
        },
    )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product detail
        .route("/product/{id}", get(products::show))
        // Categories
        .route("/categories", get(categories::index))
        .route("/category/{id}", get(categories::show))
        // Search
        .route("/search", get(search::search_page))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/thank-you", get(checkout::thank_you))
        // Chat widget
        .route("/chat/send", post(chat::send))
        // Catch-all 404
        .fallback(not_found)
}
