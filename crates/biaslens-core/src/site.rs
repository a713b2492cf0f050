//! Static site metadata: SEO fields, the web app manifest, and sitemap
//! generation.
//!
//! The metadata lives in a YAML file (`config/site.yaml` by default) and is
//! validated once at load time.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub path: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub short_name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub base_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub image: SocialImage,
    pub twitter: TwitterCard,
    pub theme_color: String,
    pub background_color: String,
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
    #[serde(default)]
    pub routes: Vec<StaticRoute>,
}

fn default_locale() -> String {
    "en_US".to_string()
}

/// Web app manifest as served at `/manifest.webmanifest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: &'static str,
    pub display: &'static str,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

/// SEO metadata for the site's pages, including Open Graph and Twitter
/// card fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub images: Vec<SocialImage>,
}

impl SiteConfig {
    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    #[must_use]
    pub fn manifest(&self) -> WebManifest {
        WebManifest {
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            description: self.description.clone(),
            start_url: "/",
            display: "standalone",
            background_color: self.background_color.clone(),
            theme_color: self.theme_color.clone(),
            icons: self.icons.clone(),
        }
    }

    #[must_use]
    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            keywords: self.keywords.join(", "),
            canonical_url: self.base().to_string(),
            open_graph: OpenGraph {
                title: self.title.clone(),
                description: self.description.clone(),
                url: self.base().to_string(),
                site_name: self.name.clone(),
                locale: self.locale.clone(),
                kind: "website",
                images: vec![self.image.clone()],
            },
            twitter: self.twitter.clone(),
        }
    }
}

/// Load and validate the site configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SiteFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let site: SiteConfig = serde_yaml::from_str(&content).map_err(ConfigError::SiteFileParse)?;

    validate_site(&site)?;

    Ok(site)
}

fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    if site.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site name must be non-empty".to_string(),
        ));
    }

    if !(site.base_url.starts_with("https://") || site.base_url.starts_with("http://")) {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must be an absolute http(s) URL",
            site.base_url
        )));
    }

    let mut seen_paths = HashSet::new();
    for route in &site.routes {
        if !route.path.is_empty() && !route.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "route '{}' must be empty or start with '/'",
                route.path
            )));
        }

        if !(0.0..=1.0).contains(&route.priority) {
            return Err(ConfigError::Validation(format!(
                "route '{}' has priority {}; must be within [0, 1]",
                route.path, route.priority
            )));
        }

        if !seen_paths.insert(route.path.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate route: '{}'",
                route.path
            )));
        }
    }

    Ok(())
}

const ARTICLE_PRIORITY: f64 = 0.7;

// Characters that cannot appear raw inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A stored article's sitemap inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapArticle {
    pub id: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

/// Sitemap entries for the static routes followed by one `/articles/{id}`
/// entry per article.
#[must_use]
pub fn build_sitemap(
    site: &SiteConfig,
    articles: &[SitemapArticle],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base = site.base();

    let static_entries = site.routes.iter().map(|route| SitemapEntry {
        loc: format!("{base}{}", route.path),
        last_modified: now,
        change_frequency: route.change_frequency,
        priority: route.priority,
    });

    let article_entries = articles.iter().map(|article| SitemapEntry {
        loc: format!(
            "{base}/articles/{}",
            utf8_percent_encode(&article.id, PATH_SEGMENT)
        ),
        last_modified: article.last_modified.unwrap_or(now),
        change_frequency: ChangeFrequency::Weekly,
        priority: ARTICLE_PRIORITY,
    });

    static_entries.chain(article_entries).collect()
}

/// Render sitemap entries as a sitemaps.org `urlset` document.
#[must_use]
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            quick_xml::escape::escape(entry.loc.as_str()),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}
