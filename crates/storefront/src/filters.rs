//! Custom Askama template filters and money formatting.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Format a dollar amount for display, e.g. `$599.99`.
#[must_use]
pub fn usd(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Returns the current year (footer copyright).
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
