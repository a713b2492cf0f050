//! Article records as stored upstream and served to display layers.
//!
//! Every field but the id is optional. Records come from an upstream pipeline
//! that does not guarantee a complete shape: a missing or wrong-typed field
//! decodes as absent, and display defaults are applied at read time.

use serde::{Deserialize, Serialize};

use crate::bias::{classify_bias, BiasClass};
use crate::lenient;
use crate::view::sentiment_bar_fraction;
use crate::CoreError;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// One aggregated news item with its sentiment and bias metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::score",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment_score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub political_bias: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<String>,
}

impl Article {
    /// Title for display; `"Untitled"` when absent or empty.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    /// Description for display; empty when absent.
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Source label used for display and grouping; `"Unknown Source"` when
    /// absent or empty.
    #[must_use]
    pub fn display_source(&self) -> &str {
        non_empty(self.source.as_deref()).unwrap_or(UNKNOWN_SOURCE)
    }

    #[must_use]
    pub fn bias_class(&self) -> BiasClass {
        classify_bias(self.political_bias.as_deref())
    }

    /// Sentiment score mapped onto `[0, 1]` for proportional bar display.
    #[must_use]
    pub fn sentiment_fraction(&self) -> f64 {
        sentiment_bar_fraction(self.sentiment_score)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// An article as emitted by the upstream analysis pipeline, before it has a
/// document id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub sentiment_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub political_bias: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub published: Option<String>,
}

impl ArticleDraft {
    /// Assign the draft its document id, derived from its URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingUrl`] when the draft has no URL.
    pub fn into_article(self) -> Result<Article, CoreError> {
        let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Err(CoreError::MissingUrl {
                title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            });
        };

        Ok(Article {
            id: document_id(url),
            title: self.title,
            description: self.description,
            source: self.source,
            sentiment: self.sentiment,
            sentiment_score: self.sentiment_score,
            political_bias: self.political_bias,
            url: self.url,
            published: self.published,
        })
    }
}

/// Derive a stable document id from an article URL.
///
/// Re-importing the same URL yields the same id, so repeated imports update
/// rather than duplicate.
#[must_use]
pub fn document_id(url: &str) -> String {
    url.trim().replace("https://", "").replace('/', "_")
}
