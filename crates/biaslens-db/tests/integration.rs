//! Offline unit tests for biaslens-db pool configuration and row types.
//! These tests do not require a live database connection.

use biaslens_core::{AppConfig, Article, Environment};
use biaslens_db::{ArticleRow, PoolConfig};
use chrono::Utc;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        site_path: PathBuf::from("./config/site.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        rate_limit_per_minute: 120,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn article_row_converts_into_article() {
    let row = ArticleRow {
        seq: 3,
        id: "www.example.com_story".to_string(),
        title: Some("Story".to_string()),
        description: None,
        source: Some("The Guardian".to_string()),
        sentiment: Some("Negative".to_string()),
        sentiment_score: Some(-0.4),
        political_bias: Some("Left".to_string()),
        url: Some("https://www.example.com/story".to_string()),
        published: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let article = Article::from(row);
    assert_eq!(article.id, "www.example.com_story");
    assert_eq!(article.display_source(), "The Guardian");
    assert_eq!(article.display_description(), "");
    assert_eq!(article.sentiment_score, Some(-0.4));
}
