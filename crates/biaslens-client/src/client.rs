use std::time::Duration;

use biaslens_core::Article;
use reqwest::{Client, StatusCode, Url};

use crate::error::ClientError;

const USER_AGENT: &str = "biaslens/0.1 (article-browser)";

/// Client for the BiasLens article API.
///
/// Use [`ArticlesClient::new`] with the API's base URL; tests point it at a
/// mock server.
pub struct ArticlesClient {
    client: Client,
    base_url: Url,
}

impl ArticlesClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // A trailing slash keeps Url::join from replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the full article collection from `GET /api/articles`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array.
    ///
    /// Elements are decoded one at a time. Wrong-typed optional fields read
    /// as absent; an element that still does not decode (no `id`, not an
    /// object) is logged and skipped so the rest of the list survives.
    pub async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
        let url = self.endpoint(&["api", "articles"])?;
        let Some(body) = self.request_json(url.clone()).await? else {
            return Err(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            });
        };

        let elements: Vec<serde_json::Value> =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: "list_articles".to_string(),
                source: e,
            })?;

        let mut articles = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<Article>(element) {
                Ok(article) => articles.push(article),
                Err(e) => tracing::warn!(index, error = %e, "skipping undecodable article"),
            }
        }
        Ok(articles)
    }

    /// Fetch one article from `GET /api/articles/{id}`; `Ok(None)` on 404.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response other than 404.
    /// - [`ClientError::Deserialize`] if the body is not an article.
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, ClientError> {
        let url = self.endpoint(&["api", "articles", id])?;
        let Some(body) = self.request_json(url).await? else {
            return Ok(None);
        };

        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| ClientError::Deserialize {
                context: format!("get_article(id={id})"),
                source: e,
            })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the body as JSON. A 404 yields `Ok(None)`.
    async fn request_json(&self, url: Url) -> Result<Option<serde_json::Value>, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let client = ArticlesClient::new("http://localhost:3000/biaslens/", 5).expect("client");
        let url = client.endpoint(&["api", "articles"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:3000/biaslens/api/articles");
    }

    #[test]
    fn endpoint_encodes_article_ids() {
        let client = ArticlesClient::new("http://localhost:3000", 5).expect("client");
        let url = client
            .endpoint(&["api", "articles", "news.example.com_a b"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/articles/news.example.com_a%20b"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ArticlesClient::new("not a url", 5).err().expect("should fail");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
