//! HTTP client for the Cuelinks product-feed API.
//!
//! Wraps `reqwest` with the feed's token authentication, keyword search URL
//! building, and the tolerant response normalization in [`crate::normalize`].
//! One call to [`CuelinksClient::search_products`] issues exactly one request;
//! there is no retry.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use vaani_core::Product;

use crate::error::CuelinksError;
use crate::normalize::extract_products;

pub const DEFAULT_BASE_URL: &str = "https://api.cuelinks.com/v2/";

const PRODUCT_FEEDS_PATH: &str = "product_feeds.json";

/// Client for the Cuelinks product-feed API.
///
/// Use [`CuelinksClient::new`] for production or
/// [`CuelinksClient::with_base_url`] to point at a mock server in tests.
pub struct CuelinksClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for CuelinksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuelinksClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CuelinksClient {
    /// Creates a new client pointed at the production Cuelinks API.
    ///
    /// # Errors
    ///
    /// Returns [`CuelinksError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CuelinksError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CuelinksError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CuelinksError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CuelinksError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CuelinksError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches the product feed by keyword.
    ///
    /// Returns the products in feed order; an empty list when nothing matched.
    /// A non-2xx status is logged but not treated as a failure: the body is
    /// still read, so a JSON error body without a product collection yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// - [`CuelinksError::Http`] on network failure or timeout.
    /// - [`CuelinksError::Deserialize`] if the body is not JSON or a product
    ///   entry is malformed.
    /// - [`CuelinksError::UnexpectedShape`] if the product collection is not a list.
    pub async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, CuelinksError> {
        let url = self.search_url(keyword)?;
        tracing::debug!(keyword, "querying cuelinks product feed");

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, self.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                keyword,
                status = status.as_u16(),
                "cuelinks returned non-success status"
            );
        }

        let body = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CuelinksError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })?;

        let products = extract_products(json)?;
        tracing::debug!(keyword, count = products.len(), "cuelinks returned products");
        Ok(products)
    }

    /// Builds the product-feed URL with a percent-encoded `keyword` parameter.
    fn search_url(&self, keyword: &str) -> Result<Url, CuelinksError> {
        let mut url =
            self.base_url
                .join(PRODUCT_FEEDS_PATH)
                .map_err(|e| CuelinksError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut().append_pair("keyword", keyword);
        Ok(url)
    }

    fn authorization_header(&self) -> String {
        format!("Token token=\"{}\"", self.api_key)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
