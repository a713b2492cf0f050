//! Normalisation of records produced by the upstream news collectors.
//!
//! Collectors disagree on field names: some emit `title`/`url`, others a
//! `headline.main` object, `link`, `summary` or `publishedAt`. An
//! [`UpstreamRecord`] accepts every spelling and folds them into one
//! [`ArticleDraft`].

use serde::Deserialize;

use crate::article::ArticleDraft;
use crate::lenient;

/// One record as it appears in a collector's JSON output.
///
/// Every field decodes leniently: a wrong-typed value reads as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::headline_main")]
    headline: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    link: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    published: Option<String>,
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient::text")]
    published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    source: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    sentiment_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    political_bias: Option<String>,
}

impl UpstreamRecord {
    /// Fold alternate field names into a draft.
    ///
    /// The primary name wins when it holds a non-blank value; otherwise the
    /// alternate is used. A `source_label` replaces whatever source the record
    /// carries.
    #[must_use]
    pub fn into_draft(self, source_label: Option<&str>) -> ArticleDraft {
        let source = match source_label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) => Some(label.to_string()),
            None => self.source,
        };

        ArticleDraft {
            title: first_present(self.title, self.headline),
            description: first_present(self.description, self.summary),
            source,
            sentiment: self.sentiment,
            sentiment_score: self.sentiment_score,
            political_bias: self.political_bias,
            url: first_present(self.url, self.link),
            published: first_present(self.published_at, self.published),
        }
    }
}

fn first_present(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    let present = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
    if present(primary.as_deref()) {
        primary
    } else if present(fallback.as_deref()) {
        fallback
    } else {
        None
    }
}
