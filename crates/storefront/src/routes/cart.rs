//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session as a list of price-snapshot lines;
//! the cart page refreshes those snapshots against the catalog on render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use techstore_core::cart::{self as cart_ops, CartLine};
use techstore_core::{Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::api::CatalogError;
use crate::cart as cart_store;
use crate::filters;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i64(),
            name: line.name.clone(),
            description: line.description.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: filters::usd(line.price),
            line_total: filters::usd(line.line_total()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&[CartLine]> for CartView {
    fn from(lines: &[CartLine]) -> Self {
        Self {
            items: lines.iter().map(CartItemView::from).collect(),
            total: filters::usd(cart_ops::total(lines)),
            item_count: cart_ops::item_count(lines),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub crumbs: Vec<crate::breadcrumb::Crumb>,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Refresh line snapshots against the current catalog.
///
/// Each line is re-fetched concurrently; [`merge_hydrated`] folds the
/// results back into the lines.
pub async fn hydrate(state: &AppState, lines: Vec<CartLine>) -> Vec<CartLine> {
    let lookups = lines
        .iter()
        .map(|line| state.catalog().get_product(line.id));
    let fetched = futures::future::join_all(lookups).await;
    merge_hydrated(lines, fetched)
}

/// Merge catalog lookup results into the stored lines.
///
/// Fresh catalog data replaces the snapshot fields and the stored
/// quantity is kept. A failed or not-found lookup keeps the stale
/// snapshot, so one bad product never fails the cart render.
fn merge_hydrated(
    lines: Vec<CartLine>,
    fetched: Vec<Result<Option<Product>, CatalogError>>,
) -> Vec<CartLine> {
    lines
        .into_iter()
        .zip(fetched)
        .map(|(line, result)| match result {
            Ok(Some(product)) => line.rehydrate(&product),
            Ok(None) => line,
            Err(e) => {
                tracing::warn!(product_id = %line.id, "cart hydration failed: {e}");
                line
            }
        })
        .collect()
}

async fn persist(session: &Session, lines: &[CartLine]) {
    if let Err(e) = cart_store::save(session, lines.to_vec()).await {
        tracing::error!("failed to save cart to session: {e}");
    }
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let lines = cart_store::load(&session).await;
    let lines = hydrate(&state, lines).await;
    persist(&session, &lines).await;

    CartShowTemplate {
        crumbs: crate::breadcrumb::trail("/cart"),
        cart: CartView::from(lines.as_slice()),
    }
}

/// Add a product to the cart (HTMX).
///
/// Looks the product up in the catalog, snapshots it into the cart, and
/// returns the count badge with an HTMX trigger so other fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product = match state.catalog().get_product(ProductId::from(form.product_id)).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html("<span class=\"cart-error\">Product not found</span>"),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("failed to add item to cart: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let lines = cart_store::load(&session).await;
    let lines = cart_ops::add(&lines, &product);
    persist(&session, &lines).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart_ops::item_count(&lines),
        },
    )
        .into_response()
}

/// Update a cart line's quantity (HTMX).
///
/// The returned fragment is hydrated so it shows current catalog prices,
/// matching what a full cart page render would show.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let lines = cart_store::load(&session).await;
    let lines = cart_ops::update_quantity(&lines, ProductId::from(form.product_id), form.quantity);
    let lines = hydrate(&state, lines).await;
    persist(&session, &lines).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(lines.as_slice()),
        },
    )
        .into_response()
}

/// Remove a line from the cart (HTMX).
///
/// Returns a hydrated cart items fragment, like [`update`].
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let lines = cart_store::load(&session).await;
    let lines = cart_ops::remove(&lines, ProductId::from(form.product_id));
    let lines = hydrate(&state, lines).await;
    persist(&session, &lines).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(lines.as_slice()),
        },
    )
        .into_response()
}

/// Cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let lines = cart_store::load(&session).await;
    CartCountTemplate {
        count: cart_ops::item_count(&lines),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            description: format!("{name} description"),
            image: format!("/images/{id}.jpg"),
            images: Vec::new(),
            specs: BTreeMap::new(),
            stock: None,
            category: None,
        }
    }

    fn stale_line(id: i64, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            name: "Phone".to_string(),
            price,
            image: "phone.jpg".to_string(),
            description: "A phone".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_merge_refreshes_snapshot_and_keeps_quantity() {
        let lines = vec![stale_line(1, Decimal::new(59999, 2), 3)];
        let merged = merge_hydrated(
            lines,
            vec![Ok(Some(product(1, "Phone Pro", Decimal::new(64999, 2))))],
        );

        assert_eq!(merged[0].name, "Phone Pro");
        assert_eq!(merged[0].price, Decimal::new(64999, 2));
        assert_eq!(merged[0].quantity, 3);
    }

    #[test]
    fn test_merge_keeps_snapshot_on_lookup_failure() {
        let lines = vec![stale_line(1, Decimal::new(59999, 2), 2)];
        let merged = merge_hydrated(
            lines.clone(),
            vec![Err(CatalogError::Parse("bad body".to_string()))],
        );
        assert_eq!(merged, lines);
    }

    #[test]
    fn test_merge_keeps_snapshot_when_delisted() {
        let lines = vec![stale_line(1, Decimal::new(59999, 2), 1)];
        let merged = merge_hydrated(lines.clone(), vec![Ok(None)]);
        assert_eq!(merged, lines);
    }

    #[test]
    fn test_merge_is_per_line_not_all_or_nothing() {
        let lines = vec![
            stale_line(1, Decimal::new(59999, 2), 1),
            stale_line(2, Decimal::new(1999, 2), 2),
        ];
        let merged = merge_hydrated(
            lines.clone(),
            vec![
                Err(CatalogError::Parse("timeout".to_string())),
                Ok(Some(product(2, "Phone Case", Decimal::new(2499, 2)))),
            ],
        );

        assert_eq!(merged[0], lines[0], "failed lookup keeps its snapshot");
        assert_eq!(merged[1].price, Decimal::new(2499, 2));
    }

    #[test]
    fn test_fragment_view_shows_merged_prices() {
        // The update/remove fragments render from hydrated lines, so a
        // catalog price change shows up without a full page load.
        let lines = vec![stale_line(1, Decimal::new(59999, 2), 1)];
        let merged = merge_hydrated(
            lines,
            vec![Ok(Some(product(1, "Phone", Decimal::new(54999, 2))))],
        );

        let view = CartView::from(merged.as_slice());
        assert_eq!(view.items[0].price, "$549.99");
        assert_eq!(view.total, "$549.99");
    }
}
