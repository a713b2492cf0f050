//! Field decoders that replace a wrong-typed value with `None` instead of
//! failing the whole record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrOther {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreOrOther {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
struct Headline {
    #[serde(default, deserialize_with = "text")]
    main: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeadlineOrOther {
    Headline(Headline),
    Other(IgnoredAny),
}

/// A string, or `None` for null and any non-string value.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrOther::deserialize(deserializer)? {
        TextOrOther::Text(text) => Some(text),
        TextOrOther::Other(_) => None,
    })
}

/// A finite number, also accepted in string form. Anything else is `None`.
pub(crate) fn score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match ScoreOrOther::deserialize(deserializer)? {
        ScoreOrOther::Number(n) => Some(n),
        ScoreOrOther::Text(raw) => raw.trim().parse::<f64>().ok(),
        ScoreOrOther::Other(_) => None,
    };
    Ok(score.filter(|s| s.is_finite()))
}

/// The `main` string of a `{ "main": ... }` headline object.
pub(crate) fn headline_main<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match HeadlineOrOther::deserialize(deserializer)? {
        HeadlineOrOther::Headline(headline) => headline.main,
        HeadlineOrOther::Other(_) => None,
    })
}
