//! Product catalog types.
//!
//! The catalog API is the source of truth for everything here; the client
//! never writes products back. Prices arrive as bare JSON numbers and the
//! API has shipped records with missing or malformed prices before, so
//! decoding is deliberately lenient: anything that is not a finite number
//! (or numeric string) decodes as zero rather than failing the whole
//! catalog fetch.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use super::ProductId;

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in dollars. Never negative; malformed values decode as 0.
    #[serde(
        default,
        deserialize_with = "lenient_price",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    /// Marketing description. Empty when the API omits it.
    #[serde(default)]
    pub description: String,
    /// Primary image URL. Empty when the API omits it.
    #[serde(default)]
    pub image: String,
    /// Gallery image URLs for the detail page.
    #[serde(default)]
    pub images: Vec<String>,
    /// Specification key/value pairs, ordered for stable rendering.
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    /// Units in stock; `None` means the API does not track stock for this
    /// product and it is treated as purchasable.
    #[serde(default)]
    pub stock: Option<i64>,
    /// Category name used by the category listing pages.
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Whether the add-to-cart control should be enabled.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|count| count > 0)
    }
}

/// Decode a price that may be a number, a numeric string, null, or absent.
///
/// Non-finite and unparsable values decode as zero; negatives are clamped
/// to zero since a price is a non-negative currency value.
fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// Best-effort conversion of a JSON value to a non-negative `Decimal`.
#[must_use]
pub fn decimal_from_value(value: &serde_json::Value) -> Decimal {
    let parsed = match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(Decimal::from_f64),
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.filter(|d| !d.is_sign_negative()).unwrap_or_default()
}
