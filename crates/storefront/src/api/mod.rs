//! HTTP clients for the external catalog/checkout and chatbot APIs.
//!
//! All business logic lives behind these endpoints; the storefront only
//! renders what they return. Calls are plain JSON request/response with no
//! retry and no caching - each call is independent and idempotent - and a
//! per-request timeout so a hung upstream cannot hang a page render.

pub mod chatbot;

pub use chatbot::{BotReply, ChatbotClient, ChatbotError};

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use techstore_core::{Product, ProductId};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (unreachable host, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Message suitable for showing to the shopper.
    ///
    /// Upstream `{message}` bodies pass through verbatim (the checkout API
    /// uses them for things like "card declined"); transport and parse
    /// failures get a generic phrasing.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Checkout order submitted to `POST /api/checkout`.
///
/// Field names serialize in the camelCase form the API expects; the same
/// struct deserializes the checkout form (the template uses matching input
/// names).
#[derive(Debug, Clone, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "credit-card".to_string()
}

/// Client for the catalog and checkout API.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|e| CatalogError::Parse(format!("invalid endpoint {path}: {e}")))
    }

    /// Fetch the entire product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success status, an unreachable host, or an
    /// unparsable body.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("/api/products")?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response.text().await.unwrap_or_default()));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Fetch a single product by id.
    ///
    /// Returns `Ok(None)` when the catalog no longer lists the product.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-success status other than 404.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint(&format!("/api/products/{id}"))?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_error(status, response.text().await.unwrap_or_default()));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Submit a checkout order.
    ///
    /// # Errors
    ///
    /// A non-2xx response yields `CatalogError::Api` carrying the server's
    /// `{message}` when the body provides one, so the handler can surface
    /// it to the shopper verbatim.
    #[instrument(skip(self, order), fields(email = %order.email))]
    pub async fn submit_checkout(&self, order: &CheckoutOrder) -> Result<(), CatalogError> {
        let url = self.endpoint("/api/checkout")?;
        let response = self.client.post(url).json(order).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_default();
        Err(CatalogError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn api_error(status: StatusCode, body: String) -> CatalogError {
    CatalogError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_order_serializes_camel_case() {
        let order = CheckoutOrder {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country: "US".to_string(),
            payment_method: "paypal".to_string(),
        };
        let value = serde_json::to_value(&order).expect("serialize");
        assert_eq!(value.get("postalCode"), Some(&"12345".into()));
        assert_eq!(value.get("paymentMethod"), Some(&"paypal".into()));
        assert!(value.get("postal_code").is_none());
    }

    #[test]
    fn test_checkout_order_default_payment_method() {
        let order: CheckoutOrder = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(order.payment_method, "credit-card");
    }

    #[test]
    fn test_api_error_user_message_passthrough() {
        let declined = CatalogError::Api {
            status: 402,
            message: "card declined".to_string(),
        };
        assert_eq!(declined.user_message(), "card declined");

        let empty = CatalogError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - down");
    }
}
