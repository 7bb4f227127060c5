//! Cart storage adapter.
//!
//! The entire cart is persisted as one versioned record under a single
//! session key - the only durable client state the storefront keeps. Every
//! handler that needs the cart goes through this adapter, so there is one
//! authoritative representation and no per-page copies to drift apart.
//! Two tabs mutating the cart at once still race read-modify-write (last
//! write wins).

use serde_json::Value;
use tower_sessions::Session;

use techstore_core::{CartLine, CartRecord};

/// Session key holding the serialized cart record.
pub const CART_KEY: &str = "cart";

/// Load the persisted cart.
///
/// An absent, unparsable, or wrong-shaped value yields an empty cart;
/// this never surfaces an error to the page.
pub async fn load(session: &Session) -> Vec<CartLine> {
    session
        .get::<Value>(CART_KEY)
        .await
        .ok()
        .flatten()
        .map(|value| CartRecord::decode(&value))
        .unwrap_or_default()
}

/// Persist the full cart, overwriting the prior value.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save(
    session: &Session,
    lines: Vec<CartLine>,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_KEY, CartRecord::new(lines)).await
}

/// Remove the persisted cart entirely (checkout success).
///
/// # Errors
///
/// Returns an error if the session store rejects the removal.
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<Value>(CART_KEY).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use techstore_core::types::{Product, ProductId};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn phone() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Phone".to_string(),
            price: Decimal::new(59999, 2),
            description: "A phone".to_string(),
            image: "phone.jpg".to_string(),
            images: Vec::new(),
            specs: BTreeMap::new(),
            stock: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_load_of_empty_session_is_empty_cart() {
        assert!(load(&session()).await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrips() {
        let session = session();
        let cart = techstore_core::cart::add(&[], &phone());
        save(&session, cart.clone()).await.expect("save");
        assert_eq!(load(&session).await, cart);
    }

    #[tokio::test]
    async fn test_clear_removes_cart() {
        let session = session();
        save(&session, techstore_core::cart::add(&[], &phone()))
            .await
            .expect("save");
        clear(&session).await.expect("clear");
        assert!(load(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_value_degrades_to_empty() {
        let session = session();
        session
            .insert(CART_KEY, "definitely not a cart")
            .await
            .expect("insert");
        assert!(load(&session).await.is_empty());
    }
}
