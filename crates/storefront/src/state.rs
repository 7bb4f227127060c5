//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{CatalogClient, ChatbotClient};
use crate::config::StorefrontConfig;

/// Per-request timeout for upstream API calls.
///
/// A hung upstream must not hang a page render.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration and the
/// upstream API clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    chatbot: ChatbotClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(API_TIMEOUT).build()?;
        let catalog = CatalogClient::new(http.clone(), config.catalog_api_url.clone());
        let chatbot = ChatbotClient::new(http, config.chatbot_api_url.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                chatbot,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the chatbot API client.
    #[must_use]
    pub fn chatbot(&self) -> &ChatbotClient {
        &self.inner.chatbot
    }
}
