//! Chatbot API client and reply shaping.
//!
//! The chatbot endpoint returns a JSON object discriminated by a `type`
//! field. That ad-hoc shape is modeled here as the [`BotReply`] tagged
//! union so every response kind is handled exhaustively at the formatting
//! site, with unknown kinds degrading to the generic message variant.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use techstore_core::types::product::decimal_from_value;

use crate::filters::usd;

/// Apology appended to the transcript on any network or parse failure.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again later.";

/// Errors that can occur when talking to the chatbot API.
#[derive(Debug, Error)]
pub enum ChatbotError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {0}")]
    Api(u16),

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A product as it appears inside a chatbot reply payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyProduct {
    pub name: String,
    #[serde(default, deserialize_with = "reply_price")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

fn reply_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// A chatbot response, discriminated by its `type` field.
#[derive(Debug, Clone)]
pub enum BotReply {
    /// `type: "products"` - search hits.
    Products { results: Vec<ReplyProduct> },
    /// `type: "comparison"` - side-by-side product comparison.
    Comparison { products: Vec<ReplyProduct> },
    /// `type: "faq"` - canned answer.
    Faq { answer: String },
    /// `type: "availability"` - stock yes/no.
    Availability { available: bool },
    /// `type: "recommendations"` - suggested products.
    Recommendations { products: Vec<ReplyProduct> },
    /// Any other shape: plain message passthrough.
    Message { message: String },
}

#[derive(Deserialize)]
struct ProductsPayload {
    #[serde(default)]
    results: Vec<ReplyProduct>,
}

#[derive(Deserialize)]
struct ComparisonPayload {
    #[serde(default)]
    products: Vec<ReplyProduct>,
}

#[derive(Deserialize)]
struct FaqPayload {
    #[serde(default)]
    answer: String,
}

#[derive(Deserialize)]
struct AvailabilityPayload {
    #[serde(default)]
    available: bool,
}

impl BotReply {
    /// Decode a chatbot response value.
    ///
    /// Unknown discriminators and payloads that do not match their
    /// discriminator's shape both fall back to [`BotReply::Message`] with
    /// whatever `message` field is present.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
        match kind {
            "products" => decode(value).map(|p: ProductsPayload| Self::Products {
                results: p.results,
            }),
            "comparison" => decode(value).map(|p: ComparisonPayload| Self::Comparison {
                products: p.products,
            }),
            "faq" => decode(value).map(|p: FaqPayload| Self::Faq { answer: p.answer }),
            "availability" => decode(value).map(|p: AvailabilityPayload| Self::Availability {
                available: p.available,
            }),
            "recommendations" => decode(value).map(|p: ComparisonPayload| Self::Recommendations {
                products: p.products,
            }),
            _ => None,
        }
        .unwrap_or_else(|| Self::Message {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// Format the reply as transcript text, one render arm per variant.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            Self::Products { results } => format!(
                "I found some products for you:\n\n{}",
                bullet_list(results)
            ),
            Self::Comparison { products } => format!(
                "Comparing products:\n\n{}",
                products
                    .iter()
                    .map(|p| format!(
                        "{}:\n- Price: {}\n- {}",
                        p.name,
                        usd(p.price),
                        p.description
                    ))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            ),
            Self::Faq { answer } => answer.clone(),
            Self::Availability { available } => if *available {
                "The product is currently in stock!"
            } else {
                "I apologize, but this product is currently out of stock."
            }
            .to_string(),
            Self::Recommendations { products } => format!(
                "Here are some products you might like:\n\n{}",
                bullet_list(products)
            ),
            Self::Message { message } => message.clone(),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

fn bullet_list(products: &[ReplyProduct]) -> String {
    products
        .iter()
        .map(|p| format!("- {} - {}", p.name, usd(p.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Client for the chatbot API.
#[derive(Clone)]
pub struct ChatbotClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ChatbotClient {
    /// Create a new chatbot API client.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Send one user message and decode the reply.
    ///
    /// One request, one response: no retry and no queueing. The transcript
    /// itself lives only in the rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success status, an unreachable host, or
    /// an unparsable body; the caller renders the apology message.
    #[instrument(skip(self, message))]
    pub async fn send(&self, message: &str) -> Result<BotReply, ChatbotError> {
        let url = self
            .base_url
            .join("/api/chatbot")
            .map_err(|e| ChatbotError::Parse(e.to_string()))?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatbotError::Api(status.as_u16()));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ChatbotError::Parse(e.to_string()))?;
        Ok(BotReply::from_value(&value))
    }
}
