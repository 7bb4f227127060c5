//! Catalog substring search.
//!
//! There is no server-side search endpoint: the storefront fetches the full
//! catalog and filters it here. Matching is a case-insensitive substring
//! test on name and description, results keep catalog order, and there is
//! no pagination or ranking.

use crate::types::Product;

/// Filter the catalog to products whose name or description contains the
/// term, case-insensitively. A blank term matches nothing.
#[must_use]
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Filter the catalog to products in the named category,
/// case-insensitively. Products without a category never match.
#[must_use]
pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| {
            product
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        })
        .cloned()
        .collect()
}
