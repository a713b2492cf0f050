pub mod app_config;
pub mod article;
pub mod bias;
pub mod config;
pub mod ingest;
mod lenient;
pub mod site;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use article::{document_id, Article, ArticleDraft, UNKNOWN_SOURCE, UNTITLED};
pub use bias::{classify_bias, BiasClass};
pub use config::{load_app_config, load_app_config_from_env};
pub use ingest::UpstreamRecord;
pub use site::{
    build_sitemap, load_site_config, render_sitemap_xml, ChangeFrequency, ManifestIcon,
    PageMetadata, SiteConfig, SitemapArticle, SitemapEntry, StaticRoute, WebManifest,
};
pub use view::{
    derive_view, filter_articles, group_by_source, sentiment_bar_fraction, toggle_expansion,
    ArticleView, BiasFilter, ExpansionState, SourceGroup, ViewMode, ViewQuery,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read site config at {path}: {source}")]
    SiteFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site config: {0}")]
    SiteFileParse(#[source] serde_yaml::Error),

    #[error("invalid site config: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("article '{title}' has no url; cannot derive a document id")]
    MissingUrl { title: String },
}
