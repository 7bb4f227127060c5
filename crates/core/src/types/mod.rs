//! Catalog domain types.
//!
//! Products are owned by the remote catalog API; the structs here are
//! read-only cached copies of what it returns.

pub mod id;
pub mod product;

pub use id::ProductId;
pub use product::Product;
