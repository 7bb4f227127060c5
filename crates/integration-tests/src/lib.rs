//! Integration tests for TechStore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Cart reducer and session persistence scenarios
//! - `catalog_search` - Catalog decoding and search filtering scenarios
//! - `chatbot_replies` - Chatbot reply decoding and rendering
//! - `checkout_orders` - Checkout order body shape
//!
//! Tests run against the crate libraries directly; no live services are
//! required.
