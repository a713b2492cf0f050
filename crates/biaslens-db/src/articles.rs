//! Database operations for the `articles` table.

use biaslens_core::{Article, SitemapArticle};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub seq: i64,
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub sentiment: Option<String>,
    pub sentiment_score: Option<f64>,
    pub political_bias: Option<String>,
    pub url: Option<String>,
    pub published: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            description: row.description,
            source: row.source,
            sentiment: row.sentiment,
            sentiment_score: row.sentiment_score,
            political_bias: row.political_bias,
            url: row.url,
            published: row.published,
        }
    }
}

/// Whether an upsert created a new row or rewrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

const ARTICLE_COLUMNS: &str = "seq, id, title, description, source, sentiment, sentiment_score, \
                               political_bias, url, published, created_at, updated_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every stored article in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_articles(pool: &PgPool) -> Result<Vec<ArticleRow>, DbError> {
    let rows = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY seq"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single article by document id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_article_by_id(pool: &PgPool, id: &str) -> Result<Option<ArticleRow>, DbError> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert an article, or overwrite the stored fields of an existing article
/// with the same id. An overwrite keeps the row's original position.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn upsert_article(pool: &PgPool, article: &Article) -> Result<UpsertOutcome, DbError> {
    // xmax is zero only for a freshly inserted tuple.
    let inserted: bool = sqlx::query_scalar(
        "INSERT INTO articles \
             (id, title, description, source, sentiment, sentiment_score, political_bias, url, published) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (id) DO UPDATE SET \
             title = EXCLUDED.title, \
             description = EXCLUDED.description, \
             source = EXCLUDED.source, \
             sentiment = EXCLUDED.sentiment, \
             sentiment_score = EXCLUDED.sentiment_score, \
             political_bias = EXCLUDED.political_bias, \
             url = EXCLUDED.url, \
             published = EXCLUDED.published, \
             updated_at = NOW() \
         RETURNING (xmax = 0)",
    )
    .bind(&article.id)
    .bind(&article.title)
    .bind(&article.description)
    .bind(&article.source)
    .bind(&article.sentiment)
    .bind(article.sentiment_score)
    .bind(&article.political_bias)
    .bind(&article.url)
    .bind(&article.published)
    .fetch_one(pool)
    .await?;

    Ok(if inserted {
        UpsertOutcome::Inserted
    } else {
        UpsertOutcome::Updated
    })
}

/// Article ids and last-update times, in insertion order, for sitemap output.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sitemap_articles(pool: &PgPool) -> Result<Vec<SitemapArticle>, DbError> {
    let rows: Vec<(String, DateTime<Utc>)> =
        sqlx::query_as("SELECT id, updated_at FROM articles ORDER BY seq")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(id, updated_at)| SitemapArticle {
            id,
            last_modified: Some(updated_at),
        })
        .collect())
}

/// Total number of stored articles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_articles(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
