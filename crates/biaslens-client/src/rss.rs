//! RSS/Atom feed collection into article drafts for the importer.

use std::time::Duration;

use biaslens_core::ArticleDraft;
use reqwest::Client;

use crate::error::ClientError;

const USER_AGENT: &str = "biaslens/0.1 (feed-collector)";

/// Parse an RSS or Atom document into drafts labelled with `source`.
///
/// Entries without a link are dropped, since the importer cannot derive an
/// id for them.
///
/// # Errors
///
/// Returns [`ClientError::Feed`] if `content` is not a recognisable feed.
pub fn parse_feed(content: &[u8], source: &str) -> Result<Vec<ArticleDraft>, ClientError> {
    let feed = feed_rs::parser::parse(content)?;

    let drafts: Vec<ArticleDraft> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let url = entry.links.first()?.href.clone();
            Some(ArticleDraft {
                title: entry.title.map(|t| t.content),
                description: entry.summary.map(|s| s.content),
                source: Some(source.to_string()),
                url: Some(url),
                published: entry.published.map(|p| p.to_rfc3339()),
                ..ArticleDraft::default()
            })
        })
        .collect();

    tracing::debug!(entries = drafts.len(), source, "parsed feed");
    Ok(drafts)
}

/// Fetches feeds over HTTP and hands the body to [`parse_feed`].
pub struct FeedCollector {
    client: Client,
}

impl FeedCollector {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `feed_url` and return its entries as drafts.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Feed`] if the body is not a feed.
    pub async fn collect(
        &self,
        feed_url: &str,
        source: &str,
    ) -> Result<Vec<ArticleDraft>, ClientError> {
        let response = self.client.get(feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                url: feed_url.to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_feed(&body, source)
    }
}
