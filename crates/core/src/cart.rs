//! Cart lines, the pure cart reducer, and the persisted record codec.
//!
//! The reducer never mutates its input: every operation takes the current
//! lines and returns a fresh `Vec`. Persistence is a separate step owned by
//! the storefront's storage adapter, which calls [`CartRecord`] to encode
//! and decode the single serialized blob.
//!
//! Invariants:
//! - at most one line per product id
//! - quantity is always >= 1 (removal is an explicit separate operation)
//! - insertion order is preserved, first added first

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Fallback image snapshot for products added without one.
pub const FALLBACK_IMAGE: &str = "default-image.jpg";

/// Fallback description snapshot for products added without one.
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Current version of the persisted cart record.
pub const CART_SCHEMA_VERSION: u32 = 1;

/// A single cart line: product id, quantity, and a denormalized snapshot of
/// the product's display fields captured at add time.
///
/// The snapshot keeps the cart renderable when the catalog API is briefly
/// unreachable or the product has been delisted; the cart page re-fetches
/// authoritative data on load and prefers it over the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub id: ProductId,
    /// Snapshot: display name.
    pub name: String,
    /// Snapshot: unit price in dollars.
    #[serde(
        default,
        deserialize_with = "snapshot_price",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    /// Snapshot: primary image URL.
    #[serde(default)]
    pub image: String,
    /// Snapshot: description.
    #[serde(default)]
    pub description: String,
    /// Units of this product in the cart, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a new line with quantity 1, applying the
    /// documented fallbacks for missing display fields.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: if product.image.is_empty() {
                FALLBACK_IMAGE.to_string()
            } else {
                product.image.clone()
            },
            description: if product.description.is_empty() {
                FALLBACK_DESCRIPTION.to_string()
            } else {
                product.description.clone()
            },
            quantity: 1,
        }
    }

    /// Refresh the snapshot fields from an authoritative product record,
    /// keeping this line's quantity. Used by cart hydration.
    #[must_use]
    pub fn rehydrate(&self, product: &Product) -> Self {
        Self {
            quantity: self.quantity,
            ..Self::snapshot(product)
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Persisted prices predate the lenient catalog decoder, so tolerate the
/// same malformed shapes here.
fn snapshot_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(crate::types::product::decimal_from_value(&value))
}

/// Add a product to the cart.
///
/// If a line with the product's id exists its quantity is incremented by
/// one; otherwise a new line with quantity 1 is appended.
#[must_use]
pub fn add(cart: &[CartLine], product: &Product) -> Vec<CartLine> {
    let mut lines = cart.to_vec();
    if let Some(line) = lines.iter_mut().find(|line| line.id == product.id) {
        line.quantity = line.quantity.saturating_add(1);
    } else {
        lines.push(CartLine::snapshot(product));
    }
    lines
}

/// Set the quantity of the matching line, clamped to a minimum of 1.
///
/// An id not present in the cart leaves it unchanged.
#[must_use]
pub fn update_quantity(cart: &[CartLine], id: ProductId, quantity: u32) -> Vec<CartLine> {
    cart.iter()
        .map(|line| {
            if line.id == id {
                CartLine {
                    quantity: quantity.max(1),
                    ..line.clone()
                }
            } else {
                line.clone()
            }
        })
        .collect()
}

/// Remove the matching line. Removing an absent id is a no-op.
#[must_use]
pub fn remove(cart: &[CartLine], id: ProductId) -> Vec<CartLine> {
    cart.iter().filter(|line| line.id != id).cloned().collect()
}

/// Sum of price times quantity over all lines; 0 for an empty cart.
#[must_use]
pub fn total(cart: &[CartLine]) -> Decimal {
    cart.iter().map(CartLine::line_total).sum()
}

/// Total number of units across all lines (the nav badge count).
#[must_use]
pub fn item_count(cart: &[CartLine]) -> u32 {
    cart.iter().map(|line| line.quantity).sum()
}

/// Versioned persisted form of the cart.
///
/// Version 1 wraps the lines in `{ "version": 1, "lines": [...] }` so the
/// schema can migrate forward. The decoder also accepts the legacy shape -
/// a bare JSON array of lines - and treats anything else as an empty cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Schema version of this record.
    pub version: u32,
    /// The cart lines, in insertion order.
    pub lines: Vec<CartLine>,
}

impl CartRecord {
    /// Wrap lines in a current-version record.
    #[must_use]
    pub const fn new(lines: Vec<CartLine>) -> Self {
        Self {
            version: CART_SCHEMA_VERSION,
            lines,
        }
    }

    /// Decode a persisted value into cart lines.
    ///
    /// Never fails: absent fields, unknown versions, legacy bare arrays
    /// with malformed entries, and outright garbage all degrade to an
    /// empty cart rather than propagating an error to the page.
    #[must_use]
    pub fn decode(value: &serde_json::Value) -> Vec<CartLine> {
        match value {
            // Legacy (pre-versioning) blob: a bare array of lines.
            serde_json::Value::Array(_) => {
                serde_json::from_value(value.clone()).unwrap_or_default()
            }
            serde_json::Value::Object(_) => serde_json::from_value::<Self>(value.clone())
                .map(|record| record.lines)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: i64, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            description: String::new(),
            image: String::new(),
            images: Vec::new(),
            specs: std::collections::BTreeMap::new(),
            stock: None,
            category: None,
        }
    }

    fn phone() -> Product {
        product(1, "Phone", Decimal::new(59999, 2))
    }

    #[test]
    fn test_add_new_product_appends_line_with_quantity_one() {
        let cart = add(&[], &phone());
        assert_eq!(cart.len(), 1);
        let line = cart.first().expect("one line");
        assert_eq!(line.id, ProductId::new(1));
        assert_eq!(line.quantity, 1);
        assert_eq!(total(&cart), Decimal::new(59999, 2));
    }

    #[test]
    fn test_add_existing_product_increments_quantity_without_duplicate() {
        let cart = add(&add(&[], &phone()), &phone());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().expect("one line").quantity, 2);
    }

    #[test]
    fn test_add_does_not_mutate_input() {
        let original = add(&[], &phone());
        let _grown = add(&original, &phone());
        assert_eq!(original.first().expect("line").quantity, 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let laptop = product(2, "Laptop", Decimal::new(129900, 2));
        let cart = add(&add(&[], &phone()), &laptop);
        // Re-adding the first product must not move it.
        let cart = add(&cart, &phone());
        let ids: Vec<i64> = cart.iter().map(|line| line.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_applies_display_fallbacks() {
        let bare = product(9, "Bare", Decimal::ZERO);
        let cart = add(&[], &bare);
        let line = cart.first().expect("line");
        assert_eq!(line.image, FALLBACK_IMAGE);
        assert_eq!(line.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_update_quantity_replaces_and_clamps() {
        let cart = add(&[], &phone());
        let cart = update_quantity(&cart, ProductId::new(1), 5);
        assert_eq!(cart.first().expect("line").quantity, 5);
        let cart = update_quantity(&cart, ProductId::new(1), 0);
        assert_eq!(cart.first().expect("line").quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cart = add(&[], &phone());
        let cart = remove(&cart, ProductId::new(99));
        assert_eq!(cart.len(), 1);
        let cart = remove(&cart, ProductId::new(1));
        assert!(cart.is_empty());
        assert!(remove(&cart, ProductId::new(1)).is_empty());
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let laptop = product(2, "Laptop", Decimal::new(100000, 2));
        let cart = add(&add(&add(&[], &phone()), &phone()), &laptop);
        // 2 * 599.99 + 1 * 1000.00
        assert_eq!(total(&cart), Decimal::new(219998, 2));
        assert_eq!(item_count(&cart), 3);
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
        assert_eq!(item_count(&[]), 0);
    }

    #[test]
    fn test_record_roundtrip() {
        let cart = add(&add(&[], &phone()), &product(2, "Laptop", Decimal::ONE));
        let value = serde_json::to_value(CartRecord::new(cart.clone())).expect("encode");
        assert_eq!(value.get("version"), Some(&json!(1)));
        assert_eq!(CartRecord::decode(&value), cart);
    }

    #[test]
    fn test_decode_accepts_legacy_bare_array() {
        let legacy = json!([
            {"id": 1, "name": "Phone", "price": 599.99, "quantity": 2}
        ]);
        let lines = CartRecord::decode(&legacy);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().expect("line").quantity, 2);
    }

    #[test]
    fn test_decode_degrades_to_empty_on_garbage() {
        for garbage in [
            json!("not a cart"),
            json!(42),
            json!(null),
            json!({"version": 1, "lines": "oops"}),
            json!([{"quantity": "broken"}]),
        ] {
            assert!(
                CartRecord::decode(&garbage).is_empty(),
                "{garbage} should decode to an empty cart"
            );
        }
    }
}
