//! TechStore Core - Shared types and cart logic.
//!
//! This crate provides the domain types used across the TechStore
//! components:
//! - `storefront` - Public-facing server-rendered storefront
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Cart mutations are modeled as a pure reducer over
//! immutable line lists, and the persisted cart format is a versioned
//! record whose decoder degrades to an empty cart instead of failing.
//!
//! # Modules
//!
//! - [`types`] - Product catalog types with lenient price decoding
//! - [`cart`] - Cart lines, the reducer, and the persisted record codec
//! - [`search`] - Catalog substring search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod search;
pub mod types;

pub use cart::{CART_SCHEMA_VERSION, CartLine, CartRecord};
pub use types::{Product, ProductId};
