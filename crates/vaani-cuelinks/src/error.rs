use thiserror::Error;

/// Errors returned by the Cuelinks product-feed client.
#[derive(Debug, Error)]
pub enum CuelinksError {
    /// Network or TLS failure, timeout, or non-2xx status from the feed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON or a product did not match the
    /// expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The product collection under `products`/`items` was not a list.
    #[error("unexpected product collection under \"{field}\": expected an array, got {found}")]
    UnexpectedShape { field: &'static str, found: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
