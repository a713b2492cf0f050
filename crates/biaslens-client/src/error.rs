use thiserror::Error;

/// Errors returned by [`crate::ArticlesClient`] and [`crate::FeedCollector`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API responded with status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
