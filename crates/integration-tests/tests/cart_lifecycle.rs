//! Integration tests for the cart lifecycle.
//!
//! These tests drive the pure reducer and the session storage adapter
//! together, the same way the cart routes do: load, mutate, save, reload.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tower_sessions::{MemoryStore, Session};

use techstore_core::cart::{self, CartLine, CartRecord};
use techstore_core::Product;
use techstore_storefront::cart as cart_store;

fn catalog_product(id: i64, name: &str, price: f64) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "price": price,
        "description": format!("{name} description"),
        "image": format!("/images/{id}.jpg"),
    }))
    .expect("product decodes")
}

fn fresh_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

// =============================================================================
// Reducer Scenarios
// =============================================================================

#[test]
fn test_add_then_add_again_merges_lines() {
    let phone = catalog_product(1, "Phone", 599.99);

    let lines = cart::add(&[], &phone);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 1);
    assert_eq!(cart::total(&lines), Decimal::new(59999, 2));

    let lines = cart::add(&lines, &phone);
    assert_eq!(lines.len(), 1, "no duplicate line for the same product");
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(cart::total(&lines), Decimal::new(119_998, 2));
}

#[test]
fn test_mixed_cart_total_and_count() {
    let phone = catalog_product(1, "Phone", 599.99);
    let case = catalog_product(2, "Phone Case", 19.99);

    let mut lines = cart::add(&[], &phone);
    lines = cart::add(&lines, &case);
    lines = cart::add(&lines, &case);

    assert_eq!(lines.len(), 2);
    assert_eq!(cart::item_count(&lines), 3);
    assert_eq!(cart::total(&lines), Decimal::new(63997, 2));
}

#[test]
fn test_remove_absent_id_is_noop() {
    let phone = catalog_product(1, "Phone", 599.99);
    let lines = cart::add(&[], &phone);
    let after = cart::remove(&lines, 999.into());
    assert_eq!(after, lines);
}

#[test]
fn test_quantity_update_flows_into_total() {
    let phone = catalog_product(1, "Phone", 100.0);
    let lines = cart::add(&[], &phone);
    let lines = cart::update_quantity(&lines, 1.into(), 5);
    assert_eq!(cart::total(&lines), Decimal::from(500));
}

// =============================================================================
// Session Persistence Scenarios
// =============================================================================

#[tokio::test]
async fn test_save_and_reload_round_trips() {
    let session = fresh_session();
    let phone = catalog_product(1, "Phone", 599.99);
    let lines = cart::add(&[], &phone);

    cart_store::save(&session, lines.clone()).await.expect("save");
    let reloaded = cart_store::load(&session).await;

    assert_eq!(reloaded, lines);
}

#[tokio::test]
async fn test_failed_checkout_leaves_cart_untouched() {
    // A declined checkout never calls clear; the stored cart survives.
    let session = fresh_session();
    let phone = catalog_product(1, "Phone", 599.99);
    let lines = cart::add(&[], &phone);
    cart_store::save(&session, lines.clone()).await.expect("save");

    let after_failure = cart_store::load(&session).await;
    assert_eq!(after_failure, lines);

    cart_store::clear(&session).await.expect("clear");
    assert!(cart_store::load(&session).await.is_empty());
}

#[tokio::test]
async fn test_legacy_bare_array_blob_still_loads() {
    let session = fresh_session();
    session
        .insert(
            cart_store::CART_KEY,
            json!([{
                "id": 7,
                "name": "Tablet",
                "price": 299.0,
                "quantity": 2,
            }]),
        )
        .await
        .expect("insert");

    let lines = cart_store::load(&session).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].price, Decimal::from(299));
}

#[tokio::test]
async fn test_garbage_blob_degrades_to_empty_cart() {
    let session = fresh_session();
    session
        .insert(cart_store::CART_KEY, json!("not a cart"))
        .await
        .expect("insert");

    assert!(cart_store::load(&session).await.is_empty());
}

// =============================================================================
// Hydration Snapshot Semantics
// =============================================================================

#[test]
fn test_rehydrate_prefers_catalog_fields_keeps_quantity() {
    let stale = catalog_product(1, "Phone", 599.99);
    let mut line = CartLine::snapshot(&stale);
    line.quantity = 3;

    let fresh = catalog_product(1, "Phone Pro", 649.99);
    let hydrated = line.rehydrate(&fresh);

    assert_eq!(hydrated.name, "Phone Pro");
    assert_eq!(hydrated.price, Decimal::new(64999, 2));
    assert_eq!(hydrated.quantity, 3);
}

#[test]
fn test_versioned_record_round_trip() {
    let phone = catalog_product(1, "Phone", 599.99);
    let lines = cart::add(&[], &phone);

    let blob = serde_json::to_value(CartRecord::new(lines.clone())).expect("encode");
    assert_eq!(blob["version"], 1);
    assert_eq!(CartRecord::decode(&blob), lines);
}
